//! `scriptgen generate <topic>` – one title + script.

use anyhow::Result;
use scriptgen_core::config::AppConfig;
use scriptgen_core::pipeline::{Generation, ScriptAssistant};
use std::io::{self, Write};

use crate::cli::notify::ConsoleNotifier;

pub fn run_generate(cfg: &AppConfig, topic: &str, history: bool) -> Result<()> {
    let topic = topic.trim();
    if topic.is_empty() {
        anyhow::bail!("topic is empty");
    }
    let mut assistant = ScriptAssistant::from_config(cfg, cfg.mode, ConsoleNotifier)?;
    let generation = assistant.generate(topic)?;
    render(&mut io::stdout().lock(), &generation, history)?;
    Ok(())
}

/// Print title, script and optionally the three history panels.
pub fn render(out: &mut impl Write, g: &Generation, history: bool) -> io::Result<()> {
    writeln!(out, "{}", g.title)?;
    writeln!(out)?;
    match &g.script {
        Some(script) => writeln!(out, "{script}")?,
        None => writeln!(out, "(script unavailable)")?,
    }
    if history {
        panel(out, "Title History", &g.title_history)?;
        panel(out, "Script History", &g.script_history)?;
        panel(out, &format!("Wikipedia Research ({})", g.topic), &g.research)?;
    }
    Ok(())
}

fn panel(out: &mut impl Write, heading: &str, body: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- {heading} ---")?;
    writeln!(out, "{body}")
}

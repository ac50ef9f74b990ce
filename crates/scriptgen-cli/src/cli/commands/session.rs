//! `scriptgen session` – many topics, one process, shared history.

use anyhow::Result;
use scriptgen_core::config::AppConfig;
use scriptgen_core::pipeline::ScriptAssistant;
use std::io::{self, BufRead, Write};

use super::generate::render;
use crate::cli::notify::ConsoleNotifier;

pub fn run_session(cfg: &AppConfig, history: bool) -> Result<()> {
    let mut assistant = ScriptAssistant::from_config(cfg, cfg.mode, ConsoleNotifier)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        eprint!("topic> ");
        io::stderr().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let topic = line.trim();
        if topic.is_empty() {
            continue;
        }
        if topic == "quit" || topic == "exit" {
            break;
        }
        match assistant.generate(topic) {
            Ok(g) => {
                render(&mut stdout.lock(), &g, history)?;
                writeln!(stdout)?;
            }
            Err(e) => {
                tracing::warn!("request for {:?} failed: {}", topic, e);
                eprintln!("error: {e}");
            }
        }
    }

    tracing::info!(
        titles = assistant.title_history().len(),
        scripts = assistant.script_history().len(),
        "session finished"
    );
    Ok(())
}

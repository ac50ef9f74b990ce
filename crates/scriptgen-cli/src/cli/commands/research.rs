//! `scriptgen research <query>` – Wikipedia lookup only.

use anyhow::Result;
use scriptgen_core::config::{AppConfig, CallMode};
use scriptgen_core::research::{ResearchSource, WikipediaClient};
use scriptgen_core::retry::RetryExecutor;

use crate::cli::notify::ConsoleNotifier;

pub fn run_research(cfg: &AppConfig, query: &str) -> Result<()> {
    let client = WikipediaClient::new(&cfg.wikipedia)?;
    let text = match cfg.mode {
        CallMode::Direct => client.lookup(query)?,
        CallMode::Retry => {
            let executor = RetryExecutor::new(cfg.retry_policy()?).with_notifier(ConsoleNotifier);
            match executor.execute(|| client.lookup(query)) {
                Some(text) => text,
                None => anyhow::bail!("research lookup did not complete"),
            }
        }
    };
    println!("{text}");
    Ok(())
}

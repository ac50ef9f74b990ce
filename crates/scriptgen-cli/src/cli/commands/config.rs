//! `scriptgen config` – show where the config lives and what is in effect.

use anyhow::Result;
use scriptgen_core::config::{self, AppConfig};

pub fn run_config(cfg: &AppConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    println!("{}", redacted_toml(cfg)?);
    Ok(())
}

/// TOML of `cfg` with the API key masked.
fn redacted_toml(cfg: &AppConfig) -> Result<String> {
    let mut shown = cfg.clone();
    if shown.llm.api_key.is_some() {
        shown.llm.api_key = Some("<redacted>".to_string());
    }
    Ok(toml::to_string_pretty(&shown)?)
}

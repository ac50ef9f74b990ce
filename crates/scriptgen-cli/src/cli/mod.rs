//! CLI for scriptgen.

mod commands;
mod notify;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use scriptgen_core::config::{self, AppConfig, CallMode, RetryConfig};

use commands::{run_config, run_generate, run_research, run_session};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "scriptgen")]
#[command(
    about = "Generate a video title and script for a topic, backed by Wikipedia research",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the call policy; unset flags keep the config file values.
#[derive(Debug, Clone, Default, Args)]
pub struct PolicyArgs {
    /// "retry" (back off on rate limits) or "direct" (fail on the first error).
    #[arg(long, value_name = "MODE")]
    pub mode: Option<CallMode>,
    /// Maximum attempts per call in retry mode.
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,
    /// Base backoff in seconds; waits are FACTOR * 2^n.
    #[arg(long, value_name = "FACTOR")]
    pub backoff_factor: Option<f64>,
}

impl PolicyArgs {
    /// Config with these overrides applied.
    pub fn apply(&self, cfg: &AppConfig) -> AppConfig {
        let mut out = cfg.clone();
        if let Some(mode) = self.mode {
            out.mode = mode;
        }
        if self.max_retries.is_some() || self.backoff_factor.is_some() {
            let base = cfg.retry.unwrap_or_default();
            out.retry = Some(RetryConfig {
                max_retries: self.max_retries.unwrap_or(base.max_retries),
                backoff_factor: self.backoff_factor.unwrap_or(base.backoff_factor),
            });
        }
        out
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate a title and script for one topic.
    Generate {
        /// Topic prompt, e.g. "the history of the bicycle".
        topic: String,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Also print title history, script history and the research text.
        #[arg(long)]
        history: bool,
    },

    /// Read topics from stdin, one per line; history is kept for the whole session.
    Session {
        #[command(flatten)]
        policy: PolicyArgs,
        /// Print history panels after every topic.
        #[arg(long)]
        history: bool,
    },

    /// Look up Wikipedia research for a query only.
    Research {
        query: String,
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: mode={:?} model={}", cfg.mode, cfg.llm.model);

        match cli.command {
            CliCommand::Generate {
                topic,
                policy,
                history,
            } => run_generate(&policy.apply(&cfg), &topic, history)?,
            CliCommand::Session { policy, history } => run_session(&policy.apply(&cfg), history)?,
            CliCommand::Research { query, policy } => run_research(&policy.apply(&cfg), &query)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

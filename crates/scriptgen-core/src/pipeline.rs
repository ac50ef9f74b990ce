//! Title -> research -> script, run strictly in sequence.
//!
//! In [`CallMode::Retry`] each step goes through the [`RetryExecutor`] and a
//! step that yields no result stops the steps that depend on it. In
//! [`CallMode::Direct`] each step is called once and the first failure is
//! returned to the caller.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

use crate::chain::LlmChain;
use crate::config::{AppConfig, CallMode};
use crate::llm::{OpenAiCompletions, TextModel};
use crate::memory::ConversationBuffer;
use crate::prompt::PromptTemplate;
use crate::research::{ResearchSource, WikipediaClient};
use crate::retry::{CallError, Notifier, RetryExecutor};

/// Message shown when the title or research step yields nothing.
pub const INCOMPLETE_MESSAGE: &str = "Failed to generate title or script due to rate limit issues.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Title,
    Research,
    Script,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::Title => "title generation",
            Step::Research => "research lookup",
            Step::Script => "script generation",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Retry mode: title or research produced no result.
    #[error("Failed to generate title or script due to rate limit issues.")]
    Incomplete { missing: Vec<Step> },
    /// Direct mode: a step failed.
    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: CallError,
    },
    #[error("template error: {0}")]
    Template(String),
}

/// Everything one request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub topic: String,
    pub title: String,
    pub research: String,
    /// `None` when the script step did not complete in retry mode.
    pub script: Option<String>,
    pub title_history: String,
    pub script_history: String,
}

pub struct ScriptAssistant {
    model: Box<dyn TextModel>,
    research: Box<dyn ResearchSource>,
    executor: RetryExecutor,
    mode: CallMode,
    title_chain: LlmChain,
    script_chain: LlmChain,
}

impl ScriptAssistant {
    pub fn new(
        model: impl TextModel + 'static,
        research: impl ResearchSource + 'static,
        executor: RetryExecutor,
        mode: CallMode,
    ) -> Self {
        Self {
            model: Box::new(model),
            research: Box::new(research),
            executor,
            mode,
            title_chain: LlmChain::new(PromptTemplate::title(), "topic", "title"),
            script_chain: LlmChain::new(PromptTemplate::script(), "title", "script"),
        }
    }

    /// Build the production clients from config. The API key is resolved here, once.
    pub fn from_config(
        cfg: &AppConfig,
        mode: CallMode,
        notifier: impl Notifier + 'static,
    ) -> Result<Self> {
        let model = OpenAiCompletions::new(&cfg.llm, cfg.api_key()?)?;
        let research = WikipediaClient::new(&cfg.wikipedia)?;
        let executor = RetryExecutor::new(cfg.retry_policy()?).with_notifier(notifier);
        Ok(Self::new(model, research, executor, mode))
    }

    pub fn mode(&self) -> CallMode {
        self.mode
    }

    pub fn title_history(&self) -> &ConversationBuffer {
        self.title_chain.memory()
    }

    pub fn script_history(&self) -> &ConversationBuffer {
        self.script_chain.memory()
    }

    /// Run the three steps for `topic`.
    pub fn generate(&mut self, topic: &str) -> Result<Generation, PipelineError> {
        tracing::info!(topic, mode = ?self.mode, "generate");

        let title_inputs = HashMap::from([("topic", topic)]);
        let title_prompt = self.title_chain.prompt(&title_inputs)?;
        let title = self.run_step(Step::Title, || {
            self.title_chain.call(self.model.as_ref(), &title_prompt)
        })?;
        if let Some(title) = &title {
            self.title_chain.remember(&title_inputs, title);
        }

        let research = self.run_step(Step::Research, || self.research.lookup(topic))?;

        let (title, research) = match (title, research) {
            (Some(t), Some(r)) => (t, r),
            (t, r) => {
                let mut missing = Vec::new();
                if t.is_none() {
                    missing.push(Step::Title);
                }
                if r.is_none() {
                    missing.push(Step::Research);
                }
                tracing::warn!(?missing, "skipping script generation");
                return Err(PipelineError::Incomplete { missing });
            }
        };

        let script_inputs = HashMap::from([
            ("title", title.as_str()),
            ("wikipedia_research", research.as_str()),
        ]);
        let script_prompt = self.script_chain.prompt(&script_inputs)?;
        let script = self.run_step(Step::Script, || {
            self.script_chain.call(self.model.as_ref(), &script_prompt)
        })?;
        match &script {
            Some(s) => self.script_chain.remember(&script_inputs, s),
            None => tracing::warn!("script generation did not complete"),
        }

        Ok(Generation {
            topic: topic.to_string(),
            title_history: self.title_chain.memory().buffer(),
            script_history: self.script_chain.memory().buffer(),
            title,
            research,
            script,
        })
    }

    fn run_step<F>(&self, step: Step, mut f: F) -> Result<Option<String>, PipelineError>
    where
        F: FnMut() -> Result<String, CallError>,
    {
        tracing::debug!(%step, "start");
        match self.mode {
            CallMode::Retry => Ok(self.executor.execute(f)),
            CallMode::Direct => f()
                .map(Some)
                .map_err(|source| PipelineError::Step { step, source }),
        }
    }
}

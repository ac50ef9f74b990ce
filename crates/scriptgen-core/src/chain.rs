//! One prompt template + one model call + history.

use std::collections::HashMap;

use crate::llm::TextModel;
use crate::memory::ConversationBuffer;
use crate::pipeline::PipelineError;
use crate::prompt::PromptTemplate;
use crate::retry::CallError;

#[derive(Debug, Clone)]
pub struct LlmChain {
    template: PromptTemplate,
    memory: ConversationBuffer,
    output_key: String,
}

impl LlmChain {
    /// The memory records the input named `memory_input_key`.
    pub fn new(template: PromptTemplate, memory_input_key: &str, output_key: &str) -> Self {
        Self {
            template,
            memory: ConversationBuffer::new(memory_input_key),
            output_key: output_key.to_string(),
        }
    }

    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    pub fn memory(&self) -> &ConversationBuffer {
        &self.memory
    }

    /// Render the prompt for `inputs`.
    pub fn prompt(&self, inputs: &HashMap<&str, &str>) -> Result<String, PipelineError> {
        self.template.format(inputs)
    }

    /// Call the model once with an already rendered prompt. No history is written.
    pub fn call<M: TextModel + ?Sized>(
        &self,
        model: &M,
        prompt: &str,
    ) -> Result<String, CallError> {
        tracing::debug!(
            output_key = %self.output_key,
            "prompt after formatting:\n{}",
            prompt
        );
        model.complete(prompt)
    }

    /// Record a completed exchange. `inputs` must contain the memory's input key.
    pub fn remember(&mut self, inputs: &HashMap<&str, &str>, output: &str) {
        let human = inputs.get(self.memory.input_key()).copied().unwrap_or_default();
        self.memory.save(human, output);
    }
}

//! Append-only conversation history for one chain.

/// Records each successful exchange as a `Human:` / `AI:` pair.
///
/// Lives for the process lifetime only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationBuffer {
    input_key: String,
    turns: Vec<(String, String)>,
}

impl ConversationBuffer {
    /// `input_key` names the chain input that is recorded as the human turn.
    pub fn new(input_key: impl Into<String>) -> Self {
        Self {
            input_key: input_key.into(),
            turns: Vec::new(),
        }
    }

    pub fn input_key(&self) -> &str {
        &self.input_key
    }

    pub fn save(&mut self, input: &str, output: &str) {
        self.turns.push((input.to_string(), output.to_string()));
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The whole history as text.
    pub fn buffer(&self) -> String {
        self.turns
            .iter()
            .map(|(human, ai)| format!("Human: {human}\nAI: {ai}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let m = ConversationBuffer::new("topic");
        assert!(m.is_empty());
        assert_eq!(m.buffer(), "");
        assert_eq!(m.input_key(), "topic");
    }

    #[test]
    fn turns_in_order() {
        let mut m = ConversationBuffer::new("topic");
        m.save("cats", "Why Cats Rule");
        m.save("dogs", "Dogs 101");
        assert_eq!(m.len(), 2);
        assert_eq!(
            m.buffer(),
            "Human: cats\nAI: Why Cats Rule\nHuman: dogs\nAI: Dogs 101"
        );
    }
}

//! Prompt templates with `{name}` placeholders.

use std::collections::HashMap;

use crate::pipeline::PipelineError;

/// Title prompt; input: `topic`.
pub const TITLE_TEMPLATE: &str = "write me a youtube video title about {topic}";

/// Script prompt; inputs: `title`, `wikipedia_research`.
pub const SCRIPT_TEMPLATE: &str = "write me a youtube video script based on this title TITLE: {title} while leveraging this wikipedia research: {wikipedia_research}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    input_variables: Vec<String>,
    template: String,
}

impl PromptTemplate {
    pub fn new(input_variables: &[&str], template: impl Into<String>) -> Self {
        Self {
            input_variables: input_variables.iter().map(|s| s.to_string()).collect(),
            template: template.into(),
        }
    }

    pub fn title() -> Self {
        Self::new(&["topic"], TITLE_TEMPLATE)
    }

    pub fn script() -> Self {
        Self::new(&["title", "wikipedia_research"], SCRIPT_TEMPLATE)
    }

    /// Substitute every declared variable. Values are inserted verbatim, so
    /// braces inside a value are never expanded.
    pub fn format(&self, inputs: &HashMap<&str, &str>) -> Result<String, PipelineError> {
        for var in &self.input_variables {
            if !inputs.contains_key(var.as_str()) {
                return Err(PipelineError::Template(format!("missing input '{var}'")));
            }
        }

        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if inputs.contains_key(&after[..close]) => {
                    out.push_str(inputs[&after[..close]]);
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prompt() {
        let inputs = HashMap::from([("topic", "rust async")]);
        assert_eq!(
            PromptTemplate::title().format(&inputs).unwrap(),
            "write me a youtube video title about rust async"
        );
    }

    #[test]
    fn script_prompt_uses_both_inputs() {
        let inputs = HashMap::from([("title", "T"), ("wikipedia_research", "R")]);
        assert_eq!(
            PromptTemplate::script().format(&inputs).unwrap(),
            "write me a youtube video script based on this title TITLE: T while leveraging this wikipedia research: R"
        );
    }

    #[test]
    fn missing_input_is_error() {
        let inputs = HashMap::from([("title", "T")]);
        let err = PromptTemplate::script().format(&inputs).unwrap_err();
        assert!(err.to_string().contains("wikipedia_research"));
    }

    #[test]
    fn braces_in_values_not_expanded() {
        let inputs = HashMap::from([("topic", "{topic} and fn main() {}")]);
        assert_eq!(
            PromptTemplate::title().format(&inputs).unwrap(),
            "write me a youtube video title about {topic} and fn main() {}"
        );
    }

    #[test]
    fn unknown_placeholder_left_alone() {
        let t = PromptTemplate::new(&["a"], "{a} {b} {");
        let inputs = HashMap::from([("a", "x")]);
        assert_eq!(t.format(&inputs).unwrap(), "x {b} {");
    }
}

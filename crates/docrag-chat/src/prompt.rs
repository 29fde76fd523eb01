//! Prompt assembly.
//!
//! A fixed template with `{{context}}` and `{{prompt}}` slots. The context
//! block is the retrieved chunk texts joined by blank lines, in the order
//! the retriever returned them.

/// The default instruction template.
const DEFAULT_TEMPLATE: &str = "\
You are an assistant that answers questions using only the provided context.
If the context does not contain the answer, say that you do not know.

Context:
{{context}}

Question: {{prompt}}

Answer:";

/// A prompt template with `{{context}}` and `{{prompt}}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template from a custom string.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the template with the question and the retrieved chunk texts.
    #[must_use]
    pub fn render(&self, question: &str, contexts: &[&str]) -> String {
        self.template
            .replace("{{context}}", &contexts.join("\n\n"))
            .replace("{{prompt}}", question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

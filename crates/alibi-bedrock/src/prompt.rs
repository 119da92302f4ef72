//! Fixed prompt template for excuse generation.
//!
//! The user message always carries a `Context:` line. `Urgency:` and
//! `Believability:` lines appear only when the request has a non-empty
//! value for them; an unset modifier leaves no trace in the prompt.

use alibi_core::models::generation::GenerationRequest;

/// Declares the output schema. The model must answer with exactly one JSON
/// object carrying a single string field, `excuse`.
pub const SYSTEM_PROMPT: &str = "\
You write short, plausible excuses. \
Respond with a single JSON object of the form {\"excuse\": \"<text>\"} \
and nothing else: no markdown, no commentary, no additional fields.";

const PREAMBLE: &str =
    "You are an AI-powered excuse generator. Generate an excuse based on the following context:";

const CLOSING: &str = "The excuse should sound natural and believable for the given situation.";

/// Render the user message for a generation request.
pub fn render_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::from(PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Context: {}\n", request.context.as_str()));

    let mut modifiers = String::new();
    if let Some(urgency) = request.urgency() {
        modifiers.push_str(&format!("Urgency: {urgency}\n"));
    }
    if let Some(believability) = request.believability() {
        modifiers.push_str(&format!("Believability: {believability}\n"));
    }
    if !modifiers.is_empty() {
        prompt.push('\n');
        prompt.push_str(&modifiers);
    }

    prompt.push('\n');
    prompt.push_str(CLOSING);
    prompt
}

use alibi_core::models::generation::{GeneratedExcuse, GenerationRequest, GenerationResult};
use tracing::{debug, info};

use crate::client::TextGenerator;
use crate::error::BedrockError;
use crate::prompt::{SYSTEM_PROMPT, render_prompt};

/// Generate one excuse for `request`.
///
/// The model's reply must parse as the declared output schema
/// (`{"excuse": string}`) with a non-empty `excuse`. The text is returned
/// verbatim.
pub async fn generate_excuse<G: TextGenerator>(
    generator: &G,
    request: &GenerationRequest,
) -> Result<GenerationResult, BedrockError> {
    info!(
        context = %request.context,
        urgency = request.urgency().unwrap_or(""),
        believability = request.believability().unwrap_or(""),
        "generating excuse"
    );

    let prompt = render_prompt(request);
    let response_text = generator.generate_text(SYSTEM_PROMPT, &prompt).await?;
    let output = parse_excuse_response(&response_text)?;

    debug!(len = output.excuse.len(), "excuse generated");

    Ok(GenerationResult {
        excuse_text: output.excuse,
    })
}

/// Validate a raw model reply against the output schema.
///
/// Tolerates a markdown code fence around the JSON object, which models
/// add despite being told not to. Nothing inside the object is altered.
pub fn parse_excuse_response(response_text: &str) -> Result<GeneratedExcuse, BedrockError> {
    let body = strip_code_fence(response_text.trim());

    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        BedrockError::ResponseParse(format!("{e}. Response: {response_text}"))
    })?;

    let output: GeneratedExcuse = serde_json::from_value(value).map_err(|e| {
        BedrockError::SchemaViolation(format!(
            "failed to parse excuse output: {e}. Response: {response_text}"
        ))
    })?;

    if output.excuse.trim().is_empty() {
        return Err(BedrockError::EmptyExcuse);
    }

    Ok(output)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag, with or without a newline after it.
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let rest = rest.trim();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

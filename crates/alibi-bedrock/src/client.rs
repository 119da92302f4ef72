use std::future::Future;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::{debug, info};

use crate::error::BedrockError;

/// Anything that can turn a system prompt and one user message into text.
///
/// Bedrock is the production implementation; tests substitute their own.
pub trait TextGenerator {
    fn generate_text(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> impl Future<Output = Result<String, BedrockError>> + Send;
}

/// A Bedrock Converse client bound to one model (inference profile ID).
#[derive(Debug, Clone)]
pub struct BedrockGenerator {
    client: Client,
    model_id: String,
}

impl BedrockGenerator {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    pub fn from_config(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self::new(Client::new(config), model_id)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl TextGenerator for BedrockGenerator {
    /// Single-turn Converse call. Returns the concatenated text blocks of
    /// the assistant's reply.
    async fn generate_text(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, BedrockError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(user_message.to_string()))
            .build()
            .map_err(|e| BedrockError::Invocation(e.to_string()))?;

        debug!(model_id = %self.model_id, "invoking converse");

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(message)
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let response_text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if let Some(usage) = response.usage() {
            info!(
                model_id = %self.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "converse complete"
            );
        }

        Ok(response_text)
    }
}

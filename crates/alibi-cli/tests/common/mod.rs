#![allow(dead_code)]

use std::sync::Mutex;

use alibi_bedrock::client::TextGenerator;
use alibi_bedrock::error::BedrockError;

/// Replays scripted replies in order and records every user message.
pub struct ScriptedGenerator {
    replies: Mutex<Vec<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        let mut replies: Vec<Result<String, String>> = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply)])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate_text(
        &self,
        _system_prompt: &str,
        user_message: &str,
    ) -> Result<String, BedrockError> {
        self.prompts.lock().unwrap().push(user_message.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err("no scripted reply left".to_string()))
            .map_err(BedrockError::Invocation)
    }
}

impl TextGenerator for &ScriptedGenerator {
    async fn generate_text(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, BedrockError> {
        (**self).generate_text(system_prompt, user_message).await
    }
}

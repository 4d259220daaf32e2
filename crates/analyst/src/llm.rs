use crate::config::Config;
use crate::error::{AnalystError, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::debug;

/// A text completion model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends an optional system message and one user message, returning the reply text.
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String>;
}

/// Any OpenAI-compatible chat completions endpoint (OpenAI, Gemini's
/// compatibility layer, local servers).
#[derive(Clone)]
pub struct OpenAiModel {
    client: Client<OpenAIConfig>,
    model: String,
    max_completion_tokens: u32,
}

impl OpenAiModel {
    pub fn new(api_key: Option<&str>, api_base: &str, model: &str) -> Self {
        let mut config = OpenAIConfig::new().with_api_base(api_base);
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            max_completion_tokens: 1024,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.llm_api_key.as_deref(),
            &config.llm_api_base,
            &config.llm_model,
        )
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );

        let request = CreateChatCompletionRequestArgs::default()
            .max_completion_tokens(self.max_completion_tokens)
            .temperature(0.0)
            .model(&self.model)
            .messages(messages)
            .build()?;

        debug!(model = %self.model, "sending completion request");
        let response = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AnalystError::EmptyCompletion)
    }
}

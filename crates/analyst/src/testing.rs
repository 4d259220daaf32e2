use crate::error::{AnalystError, Result};
use crate::llm::LanguageModel;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with queued completions in order. `None` simulates a failed request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Option<String>>>,
    pub prompts: Mutex<Vec<(Option<String>, String)>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(Into::into)).collect()),
            prompts: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.map(str::to_string), prompt.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .flatten()
            .ok_or(AnalystError::EmptyCompletion)
    }
}

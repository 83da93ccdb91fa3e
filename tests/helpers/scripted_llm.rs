use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use docqa::application::ports::{LlmClient, LlmClientError, LlmClientFactory, LlmTokenStream};
use docqa::domain::{Credential, Message};

pub const VALID_KEY: &str = "sk-valid-test-key";

#[derive(Debug, Clone)]
pub enum ScriptedItem {
    Fragment(&'static str),
    Fail(&'static str),
}

#[derive(Default)]
pub struct ScriptLog {
    pub factory_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub completion_calls: AtomicUsize,
    pub messages: Mutex<Vec<Message>>,
}

impl ScriptLog {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn completion_calls(&self) -> usize {
        self.completion_calls.load(Ordering::SeqCst)
    }

    pub fn factory_calls(&self) -> usize {
        self.factory_calls.load(Ordering::SeqCst)
    }

    pub fn sent_messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

/// Factory for clients that accept only [`VALID_KEY`] and answer with a fixed script.
pub struct ScriptedFactory {
    items: Vec<ScriptedItem>,
    pub log: Arc<ScriptLog>,
}

impl ScriptedFactory {
    pub fn new(items: Vec<ScriptedItem>) -> Self {
        Self {
            items,
            log: Arc::new(ScriptLog::default()),
        }
    }

    pub fn answering(fragments: &[&'static str]) -> Self {
        Self::new(fragments.iter().copied().map(ScriptedItem::Fragment).collect())
    }
}

impl LlmClientFactory for ScriptedFactory {
    fn create(&self, credential: &Credential) -> Arc<dyn LlmClient> {
        self.log.factory_calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(ScriptedClient {
            authorized: credential.expose() == VALID_KEY,
            items: self.items.clone(),
            log: Arc::clone(&self.log),
        })
    }
}

struct ScriptedClient {
    authorized: bool,
    items: Vec<ScriptedItem>,
    log: Arc<ScriptLog>,
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn list_models(&self) -> Result<Vec<String>, LlmClientError> {
        self.log.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.authorized {
            return Err(LlmClientError::Unauthorized(
                "HTTP 401 Unauthorized: Incorrect API key provided".to_string(),
            ));
        }
        Ok(vec!["gpt-5-nano".to_string(), "gpt-4o-mini".to_string()])
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
    ) -> Result<LlmTokenStream, LlmClientError> {
        self.log.completion_calls.fetch_add(1, Ordering::SeqCst);
        self.log
            .messages
            .lock()
            .unwrap()
            .extend(messages.iter().cloned());

        let items: Vec<Result<String, LlmClientError>> = self
            .items
            .iter()
            .map(|item| match item {
                ScriptedItem::Fragment(text) => Ok((*text).to_string()),
                ScriptedItem::Fail(reason) => {
                    Err(LlmClientError::StreamInterrupted((*reason).to_string()))
                }
            })
            .collect();

        Ok(Box::pin(futures::stream::iter(items)))
    }
}

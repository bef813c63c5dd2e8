use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::common::{LlmError, LlmResult};

use super::client::{ChatCompletion, ChatRequest};

/// Backend that replays canned results in call order and records requests.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<LlmResult<String>>>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<LlmResult<String>>) -> Arc<Self> {
        Arc::new(ScriptedBackend {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedBackend {
    async fn complete(&self, request: ChatRequest) -> LlmResult<String> {
        self.calls.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::Upstream { status: 500, message: Some("script exhausted".into()) }))
    }
}

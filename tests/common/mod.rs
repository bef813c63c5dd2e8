#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use report_studio::ai::{ChatCompletion, ChatRequest};
use report_studio::common::{AppConfig, LlmError, LlmResult};
use report_studio::ApiState;

/// Replays canned answers in order and records every request it sees.
#[derive(Default)]
pub struct StubBackend {
    script: Mutex<VecDeque<LlmResult<String>>>,
    calls: Mutex<Vec<ChatRequest>>,
    delay: Option<Duration>,
}

impl StubBackend {
    pub fn replying(script: Vec<LlmResult<String>>) -> Arc<Self> {
        Arc::new(StubBackend {
            script: Mutex::new(script.into()),
            ..Default::default()
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(StubBackend {
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubBackend {
    async fn complete(&self, request: ChatRequest) -> LlmResult<String> {
        self.calls.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}

pub fn upstream(message: &str) -> LlmResult<String> {
    Err(LlmError::Upstream { status: 503, message: Some(message.to_string()) })
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::new("test-api-key");
    config.server.rate_limit_per_minute = 1000;
    config.server.rate_limit_burst = 1000;
    config
}

pub fn state_with(
    config: AppConfig,
    enhancer: Arc<StubBackend>,
    generator: Arc<StubBackend>,
) -> ApiState {
    ApiState::with_backends(config, enhancer, generator)
}

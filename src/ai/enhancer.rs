use std::sync::Arc;

use crate::common::{EnhanceError, EnhancerConfig};
use crate::metrics;
use crate::models::{EnhanceRequest, Template};
use crate::templates::prompts::{enhancer_system_prompt, enhancer_user_prompt};

use super::client::{ChatCompletion, ChatRequest};

/// Turns a short idea into a detailed prompt for a template. One call, no
/// retry.
pub struct PromptEnhancer {
    client: Arc<dyn ChatCompletion>,
    config: EnhancerConfig,
}

impl PromptEnhancer {
    pub fn new(client: Arc<dyn ChatCompletion>, config: EnhancerConfig) -> Self {
        PromptEnhancer { client, config }
    }

    /// Checks the request before any outbound call.
    pub fn validate(request: &EnhanceRequest) -> Result<(&str, &Template), EnhanceError> {
        match (request.idea.as_deref(), request.template.as_ref()) {
            (Some(idea), Some(template)) if !idea.is_empty() && !template.title.is_empty() => {
                Ok((idea, template))
            }
            _ => Err(EnhanceError::InvalidRequest),
        }
    }

    pub async fn enhance(&self, request: &EnhanceRequest) -> Result<String, EnhanceError> {
        let (idea, template) = Self::validate(request)?;

        let chat = ChatRequest::new(
            &self.config.model,
            enhancer_system_prompt(template),
            enhancer_user_prompt(idea),
        )
        .max_tokens(self.config.max_tokens)
        .temperature(self.config.temperature);

        let result = match self.client.complete(chat).await {
            Ok(text) if text.is_empty() => Err(EnhanceError::EmptyResponse),
            Ok(text) => Ok(text),
            Err(e) => Err(EnhanceError::from(e)),
        };

        metrics::ENHANCE_REQUESTS
            .with_label_values(&[metrics::outcome(&result)])
            .inc();

        if let Err(e) = &result {
            tracing::error!(template = %template.title, error = %e, "Prompt enhancement failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedBackend;
    use crate::common::LlmError;

    fn request() -> EnhanceRequest {
        EnhanceRequest {
            idea: Some("tiffin service".into()),
            template: Some(Template {
                title: "Business Pitch Report".into(),
                ..Default::default()
            }),
        }
    }

    #[tokio::test]
    async fn returns_trimmed_text_from_configured_model() {
        let backend = ScriptedBackend::new(vec![Ok("Create a pitch for [Pune].".into())]);
        let enhancer = PromptEnhancer::new(backend.clone(), EnhancerConfig::default());

        let text = enhancer.enhance(&request()).await.unwrap();
        assert_eq!(text, "Create a pitch for [Pune].");

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "google/gemini-2.5-flash-lite");
        assert_eq!(calls[0].max_tokens, 500);
        assert_eq!(calls[0].temperature, 0.6);
        assert_eq!(calls[0].messages[1].content, "Enhance this idea: \"tiffin service\"");
    }

    #[tokio::test]
    async fn missing_title_fails_before_calling() {
        let backend = ScriptedBackend::new(vec![]);
        let enhancer = PromptEnhancer::new(backend.clone(), EnhancerConfig::default());

        let mut req = request();
        req.template.as_mut().unwrap().title.clear();
        assert!(matches!(enhancer.enhance(&req).await, Err(EnhanceError::InvalidRequest)));

        let mut req = request();
        req.idea = None;
        assert!(matches!(enhancer.enhance(&req).await, Err(EnhanceError::InvalidRequest)));

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_output_is_an_error() {
        let backend = ScriptedBackend::new(vec![Ok(String::new())]);
        let enhancer = PromptEnhancer::new(backend, EnhancerConfig::default());

        let err = enhancer.enhance(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "The AI enhancer returned an empty response.");
    }

    #[tokio::test]
    async fn upstream_failure_is_not_retried() {
        let backend = ScriptedBackend::new(vec![
            Err(LlmError::Upstream { status: 402, message: Some("Insufficient credits".into()) }),
            Ok("never used".into()),
        ]);
        let enhancer = PromptEnhancer::new(backend.clone(), EnhancerConfig::default());

        let err = enhancer.enhance(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Insufficient credits");
        assert_eq!(backend.calls().len(), 1);
    }
}

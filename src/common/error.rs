use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures of a single chat-completion call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success status; `message` is the upstream's `error.message` when present.
    #[error("{}", .message.as_deref().unwrap_or("API call failed"))]
    Upstream { status: u16, message: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("Empty response")]
    EmptyResponse,
}

pub type LlmResult<T> = Result<T, LlmError>;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("A valid idea and template object are required")]
    InvalidRequest,
    #[error("{0}")]
    Upstream(String),
    #[error("The AI enhancer returned an empty response.")]
    EmptyResponse,
}

impl From<LlmError> for EnhanceError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Upstream { message: None, .. } => {
                EnhanceError::Upstream("Failed to get response from AI enhancer.".to_string())
            }
            LlmError::EmptyResponse => EnhanceError::EmptyResponse,
            other => EnhanceError::Upstream(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Valid idea required")]
    MissingIdea,
    #[error("Valid template required")]
    MissingTemplate,
    #[error("Request must be at least 10 characters")]
    IdeaTooShort,
    #[error("All models failed. Last error: {0}")]
    AllModelsFailed(LlmError),
    #[error("No report models configured")]
    NoModels,
}

impl ReportError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReportError::MissingIdea | ReportError::MissingTemplate | ReportError::IdeaTooShort
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_prefers_upstream_message() {
        let err = LlmError::Upstream { status: 429, message: Some("Rate limited".into()) };
        assert_eq!(err.to_string(), "Rate limited");

        let err = LlmError::Upstream { status: 502, message: None };
        assert_eq!(err.to_string(), "API call failed");
    }

    #[test]
    fn enhancer_uses_its_own_fallback_message() {
        let err: EnhanceError = LlmError::Upstream { status: 500, message: None }.into();
        assert_eq!(err.to_string(), "Failed to get response from AI enhancer.");

        let err: EnhanceError = LlmError::Upstream { status: 401, message: Some("No auth".into()) }.into();
        assert_eq!(err.to_string(), "No auth");
    }

    #[test]
    fn exhaustion_message_carries_last_error() {
        let err = ReportError::AllModelsFailed(LlmError::EmptyResponse);
        assert_eq!(err.to_string(), "All models failed. Last error: Empty response");
        assert!(!err.is_validation());
        assert!(ReportError::IdeaTooShort.is_validation());
    }
}

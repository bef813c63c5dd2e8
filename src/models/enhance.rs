use serde::{Deserialize, Serialize};

use super::Template;

/// Body of `POST /api/enhance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub template: Option<Template>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub enhanced_prompt: String,
}

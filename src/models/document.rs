use serde::{Deserialize, Serialize};

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Body of `POST /api/docx`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Newline-delimited report text; each line becomes one paragraph.
    #[serde(default)]
    pub report: String,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "report".to_string()
}

impl Default for ExportRequest {
    fn default() -> Self {
        ExportRequest {
            report: String::new(),
            title: default_title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let request: ExportRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.report, "");
        assert_eq!(request.title, "report");
    }
}

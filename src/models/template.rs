use serde::{Deserialize, Serialize};

/// Input widget a template field is rendered with on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line input.
    Input,
    /// Multi-line input.
    Textarea,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateField {
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: FieldKind,
}

fn default_kind() -> FieldKind {
    FieldKind::Input
}

/// Report template as the client defines it. Never stored server side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub fields: Vec<TemplateField>,
}

impl Template {
    /// Field labels joined with `", "`, in declaration order.
    pub fn field_labels(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use serde::{Deserialize, Serialize};

/// One attachment as reported by the mail host. The extension arrives
/// normalized (lowercase, no leading dot) from the validation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub extension: String,
    pub size_kb: f64,
    pub mime_type: String,
}

/// A structurally validated inbound email. The engine only judges content;
/// shape checking happens before this type is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailPayload {
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub subject: String,
    pub body_text: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub page_source: Option<String>,
}

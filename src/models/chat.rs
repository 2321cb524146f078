use serde::{ Serialize, Deserialize };

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IntroResponse {
    #[serde(default)]
    pub intro: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResetRequest {
    pub conversation_id: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResetResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub total_messages: Option<usize>,
    #[serde(default)]
    pub turns: Option<u64>,
    /// Set by the backend when it has no record of the conversation.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub sass_level: Option<String>,
}

/// Returns the field only when it carries non-empty text.
pub fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

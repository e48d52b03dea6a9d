use serde::{Deserialize, Serialize};

/// Inbound request body for POST /generate. The topic is accepted as-is;
/// empty strings are not rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

/// The shape the prompt asks the model to produce. Responses are passed
/// through to callers without being re-validated against this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub title: String,
    /// HTML fragment limited to basic tags (`<p>`, `<b>`, `<ul>`).
    pub content: String,
    pub tags: Vec<String>,
}

pub mod http;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Endpoints;
use crate::models::chat::{
    ChatRequest,
    ChatResponse,
    HealthResponse,
    HistoryResponse,
    IntroResponse,
    ResetRequest,
    ResetResponse,
};
use self::http::HttpChatBackend;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status {
        status: u16,
        url: String,
    },
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// The backend operations the widget consumes.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn intro(&self) -> Result<IntroResponse, ClientError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;

    async fn reset(&self, request: &ResetRequest) -> Result<ResetResponse, ClientError>;

    async fn history(&self, conversation_id: &str) -> Result<HistoryResponse, ClientError>;

    async fn health(&self) -> Result<HealthResponse, ClientError>;
}

pub fn new_backend(endpoints: &Endpoints) -> Result<Arc<dyn ChatBackend>, ClientError> {
    let backend = HttpChatBackend::new(endpoints.clone())?;
    Ok(Arc::new(backend))
}

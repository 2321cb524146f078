use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, Response, header::{ HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE } };
use serde::de::DeserializeOwned;

use super::{ ChatBackend, ClientError };
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

/// JSON-over-HTTP backend. No request timeout is set; a silent server leaves
/// the call pending.
pub struct HttpChatBackend {
    http: HttpClient,
    endpoints: Endpoints,
}

impl HttpChatBackend {
    pub fn new(endpoints: Endpoints) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self { http, endpoints })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            url: resp.url().to_string(),
        });
    }
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn intro(&self) -> Result<IntroResponse, ClientError> {
        debug!("GET {}", self.endpoints.intro);
        let resp = self.http.get(self.endpoints.intro.clone()).send().await?;
        decode(resp).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        debug!("POST {} (conversation {})", self.endpoints.chat, request.conversation_id);
        let resp = self.http.post(self.endpoints.chat.clone()).json(request).send().await?;
        decode(resp).await
    }

    async fn reset(&self, request: &ResetRequest) -> Result<ResetResponse, ClientError> {
        debug!("POST {} (conversation {})", self.endpoints.reset, request.conversation_id);
        let resp = self.http.post(self.endpoints.reset.clone()).json(request).send().await?;
        decode(resp).await
    }

    async fn history(&self, conversation_id: &str) -> Result<HistoryResponse, ClientError> {
        let mut url = self.endpoints.history.clone();
        url.query_pairs_mut().append_pair("conversation_id", conversation_id);
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        decode(resp).await
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        debug!("GET {}", self.endpoints.health);
        let resp = self.http.get(self.endpoints.health.clone()).send().await?;
        decode(resp).await
    }
}

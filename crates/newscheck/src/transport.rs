use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use crate::schema::{CheckRequest, CHECK_NEWS_PATH};
use crate::validator::Statement;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// One submission on its way to the service. Built fresh per `submit`.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    pub request_id: Uuid,
    pub statement: Statement,
}

impl VerificationRequest {
    pub fn new(statement: Statement) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            statement,
        }
    }

    pub fn body(&self) -> CheckRequest {
        CheckRequest {
            statement: self.statement.as_str().to_string(),
        }
    }
}

/// Status and raw body of whatever the service answered.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// No response arrived (refused, timed out, DNS, body cut off).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait CheckTransport: Send + Sync {
    async fn send(&self, request: &VerificationRequest) -> Result<RawResponse, TransportError>;
    fn endpoint(&self) -> String;
}

pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl CheckTransport for HttpTransport {
    async fn send(&self, request: &VerificationRequest) -> Result<RawResponse, TransportError> {
        // .json() sets Content-Type: application/json
        let resp = self
            .client
            .post(self.endpoint())
            .header("X-Request-Id", request.request_id.to_string())
            .json(&request.body())
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHECK_NEWS_PATH)
    }
}

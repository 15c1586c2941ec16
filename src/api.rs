// API client module: a small blocking HTTP client for the question-answering
// backend. Two calls matter: a health check against the service root and
// question submission to `/api/ask`.

use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::language::LanguageTag;

/// Holds a reqwest blocking client and the base URL of the backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Body of `POST /api/ask`. `language` is left out of the JSON when unset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageTag>,
}

impl AnswerRequest {
    pub fn new(question: impl Into<String>, language: Option<LanguageTag>) -> Self {
        AnswerRequest {
            question: question.into(),
            language,
        }
    }
}

/// Answer returned by the backend. `language` is whatever the service echoes
/// back, which is not limited to the two tags we send.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnswerResponse {
    pub answer: String,
    pub question: String,
    pub language: String,
}

/// Body of `GET /`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Body of `GET /api/health`: whether the backend can reach its AI model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub ai_service: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

const HEALTHY: &str = "healthy";

/// Why a request to the backend failed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS failure, refused connection, timeout and the like.
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Unreachable(e) => e.status(),
            ApiError::Malformed(_) => None,
        }
    }
}

/// What the screen needs from a backend. `ApiClient` is the real one.
pub trait AnswerService {
    /// `true` only when the backend reports itself healthy. Never fails.
    fn health_check(&self) -> bool;

    fn ask(&self, request: &AnswerRequest) -> Result<AnswerResponse, ApiError>;
}

impl ApiClient {
    /// Build a client for the backend described by `config`.
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET the service root and report whether it says `"healthy"`.
    /// Transport errors, odd bodies and other statuses all come back `false`.
    pub fn health_check(&self) -> bool {
        match self.root_status() {
            Ok(health) if health.status == HEALTHY => true,
            Ok(health) => {
                tracing::warn!(status = %health.status, "backend reported unhealthy status");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "connection test failed");
                false
            }
        }
    }

    fn root_status(&self) -> Result<HealthStatus, ApiError> {
        let url = self.url("/");
        tracing::debug!(%url, "health check");
        let res = self.client.get(&url).send().map_err(ApiError::Unreachable)?;
        let body = res.text().map_err(ApiError::Unreachable)?;
        serde_json::from_str(&body).map_err(ApiError::Malformed)
    }

    /// POST a question to `/api/ask`. No validation happens here: callers
    /// are expected to send a trimmed, non-empty question.
    pub fn ask(&self, req: &AnswerRequest) -> Result<AnswerResponse, ApiError> {
        let url = self.url("/api/ask");
        tracing::debug!(%url, language = ?req.language, "asking question");
        let res = self
            .client
            .post(&url)
            .json(req)
            .send()
            .map_err(ApiError::Unreachable);
        let result = res.and_then(read_json);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "ask failed");
        }
        result
    }

    /// GET `/api/health`, which checks the backend's own AI model.
    pub fn service_health(&self) -> Result<ServiceHealth, ApiError> {
        let url = self.url("/api/health");
        tracing::debug!(%url, "service health");
        let res = self.client.get(&url).send().map_err(ApiError::Unreachable)?;
        read_json(res)
    }
}

impl AnswerService for ApiClient {
    fn health_check(&self) -> bool {
        ApiClient::health_check(self)
    }

    fn ask(&self, request: &AnswerRequest) -> Result<AnswerResponse, ApiError> {
        ApiClient::ask(self, request)
    }
}

/// Require a 2xx status, then parse the body as JSON.
fn read_json<T: DeserializeOwned>(res: reqwest::blocking::Response) -> Result<T, ApiError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().unwrap_or_default();
        return Err(ApiError::Rejected { status, body });
    }
    let body = res.text().map_err(ApiError::Unreachable)?;
    serde_json::from_str(&body).map_err(ApiError::Malformed)
}

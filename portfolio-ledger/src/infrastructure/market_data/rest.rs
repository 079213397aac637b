use crate::application::ports::ProviderError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {msg}")]
    Api { status: u16, msg: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convert infrastructure RestError to the port-level ProviderError
impl RestError {
    pub fn into_provider_error(self, timeout: Duration) -> ProviderError {
        match self {
            RestError::Http(e) if e.is_timeout() => ProviderError::Timeout(timeout.as_millis() as u64),
            RestError::Http(e) => ProviderError::Network(e.to_string()),
            RestError::Api { status, msg } => ProviderError::Api {
                status,
                message: msg,
            },
            RestError::NotFound(what) => ProviderError::NotFound(what),
            RestError::Parse(msg) => ProviderError::Parse(msg),
        }
    }
}

/// How a provider expects its API key
#[derive(Debug, Clone)]
pub enum ApiAuth {
    None,
    Header { name: &'static str, value: String },
    Bearer(String),
}

/// Thin JSON-over-HTTP client shared by the market-data adapters
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    auth: ApiAuth,
    timeout: Duration,
}

impl RestClient {
    pub fn new(base_url: &str, auth: ApiAuth, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(RestClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(query);
        request = match &self.auth {
            ApiAuth::None => request,
            ApiAuth::Header { name, value } => request.header(*name, value),
            ApiAuth::Bearer(token) => request.bearer_auth(token),
        };

        let resp = request.send().await?;
        self.handle_response(path, resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(RestError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(RestError::Api {
                status: status.as_u16(),
                msg: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| RestError::Parse(e.to_string()))
    }
}

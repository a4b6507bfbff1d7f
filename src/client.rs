use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{LinkResponse, MessageResponse, ShortenRequest, UpdateRequest};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("short link not found")]
    NotFound,

    #[error("server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Typed client for the management API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the backend root, e.g. "http://localhost:4000".
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub async fn shorten(&self, url: &str) -> Result<LinkResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/shorten", self.base_url))
            .json(&ShortenRequest {
                url: url.to_owned(),
            })
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn list(&self) -> Result<Vec<LinkResponse>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/urls", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn get(&self, id: &str) -> Result<LinkResponse, ClientError> {
        let resp = self.http.get(self.url_for(id)).send().await?;
        decode(resp).await
    }

    pub async fn update(&self, id: &str, new_url: &str) -> Result<LinkResponse, ClientError> {
        let resp = self
            .http
            .put(self.url_for(id))
            .json(&UpdateRequest {
                new_url: new_url.to_owned(),
            })
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self.http.delete(self.url_for(id)).send().await?;
        decode::<MessageResponse>(resp).await.map(|_| ())
    }

    fn url_for(&self, id: &str) -> String {
        format!("{}/api/urls/{}", self.base_url, id)
    }
}

/// Turn a response into `T`, mapping non-2xx statuses to `ClientError`.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }
    if !status.is_success() {
        let message = resp
            .json::<MessageResponse>()
            .await
            .map(|m| m.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_owned());
        return Err(ClientError::Status { status, message });
    }
    Ok(resp.json().await?)
}

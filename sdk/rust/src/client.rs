use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: i64,
    pub url: String,
}

#[derive(Debug, Serialize)]
struct NewAnchor<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: i64,
}

/// Error envelope returned by the service for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with its JSON error envelope.
    #[error("service returned {}: {}", .0.status, .0.message)]
    Api(ErrorBody),

    /// Non-2xx without a decodable envelope.
    #[error("service returned {status}: {body}")]
    Unexpected { status: StatusCode, body: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Api(body) => Some(body.status),
            ClientError::Unexpected { status, .. } => Some(status.as_u16()),
        }
    }
}

pub struct AnchorClient {
    client: Client,
    base_url: String,
}

impl AnchorClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:8080/v1`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn add(&self, url: &str) -> Result<i64, ClientError> {
        let resp = self
            .client
            .post(format!("{}/anchor", self.base_url))
            .json(&NewAnchor { url })
            .send()
            .await?;
        let created: Created = check(resp).await?.json().await?;
        Ok(created.id)
    }

    pub async fn list(&self) -> Result<Vec<Anchor>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/anchors", self.base_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Anchor, ClientError> {
        let resp = self
            .client
            .get(format!("{}/anchor/{}", self.base_url, id))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn update(&self, anchor: &Anchor) -> Result<(), ClientError> {
        let resp = self
            .client
            .put(format!("{}/anchor", self.base_url))
            .json(anchor)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(format!("{}/anchor/{}", self.base_url, id))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await?;
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(envelope) => Err(ClientError::Api(envelope)),
        Err(_) => Err(ClientError::Unexpected { status, body }),
    }
}

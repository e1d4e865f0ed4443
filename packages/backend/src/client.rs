//! HTTP client for the deck API, used by the `vocab-study` terminal client
//! and the end-to-end tests.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vocab_deck_core::{DeckKind, Rating, Word};

use crate::auth::{AuthUser, AUTH_HEADER_NAME};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("not logged in")]
    NotAuthenticated,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ReviewBody<'a> {
    id: &'a str,
    rating: Rating,
}

#[derive(Deserialize)]
struct LoginBody {
    token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct ReviewReply {
    data: Word,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&CredentialsBody { email, password })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Logs in and keeps the issued token for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthUser, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&CredentialsBody { email, password })
            .send()
            .await?;
        let body: LoginBody = ensure_success(response).await?.json().await?;
        self.token = Some(body.token);
        Ok(body.user)
    }

    pub async fn fetch_deck(&self, kind: DeckKind) -> Result<Vec<Word>, ClientError> {
        let path = match kind {
            DeckKind::Full => "/api/decks",
            DeckKind::Difficult => "/api/decks/difficult",
        };
        let response = self
            .http
            .get(self.url(path))
            .header(AUTH_HEADER_NAME, self.require_token()?)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Submits one rating and returns the word as stored after the update.
    pub async fn review(&self, word_id: &str, rating: Rating) -> Result<Word, ClientError> {
        let response = self
            .http
            .post(self.url("/api/review"))
            .header(AUTH_HEADER_NAME, self.require_token()?)
            .json(&ReviewBody { id: word_id, rating })
            .send()
            .await?;
        let reply: ReviewReply = ensure_success(response).await?.json().await?;
        Ok(reply.data)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn require_token(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::NotAuthenticated)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.url("/api/decks"), "http://localhost:4000/api/decks");
    }

    #[tokio::test]
    async fn deck_requests_need_a_token() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch_deck(DeckKind::Full).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }
}

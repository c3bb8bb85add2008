use reqwest::StatusCode;
use serde::Serialize;

use crate::model::{Todo, TodoId};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("todo text must not be empty")]
    EmptyText,
    #[error("todo not found")]
    NotFound,
    #[error("server rejected the request: {0}")]
    Rejected(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Thin client over the four todo endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .http
            .get(format!("{}/todos", self.base_url))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create(&self, text: &str) -> Result<Todo, ClientError> {
        let response = self
            .http
            .post(format!("{}/todos", self.base_url))
            .json(&CreateRequest { text })
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update(
        &self,
        id: TodoId,
        text: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Todo, ClientError> {
        let response = self
            .http
            .put(format!("{}/todos/{id}", self.base_url))
            .json(&UpdateRequest { text, completed })
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/todos/{id}", self.base_url))
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status if status.is_client_error() => {
                let message = response.text().await.unwrap_or_default();
                Err(ClientError::Rejected(message))
            }
            _ => Ok(response.error_for_status()?),
        }
    }
}

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

const REST_PREFIX: &str = "/rest/v1";

#[derive(Error, Debug)]
pub enum StoreError {
    /// Row rejected by a uniqueness constraint (duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store request failed: {0}")]
    Transport(String),

    #[error("Store error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// Row-oriented gateway to the relational store, reached over its REST
/// surface. One instance per service call site; the underlying client
/// pools connections.
pub struct Store {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Store {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_url.clone(),
            api_key: config.database_api_key.clone(),
        }
    }

    fn headers(&self, returning: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.api_key.is_empty() {
            if let Ok(key) = HeaderValue::from_str(&self.api_key) {
                headers.insert("apikey", key);
            }
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
                headers.insert(AUTHORIZATION, bearer);
            }
        }
        if returning {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        headers
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        returning: bool,
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Store request: {} {}", method, url);

        let mut req = self.client.request(method, &url).headers(self.headers(returning));
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Store error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::CONFLICT => StoreError::Conflict(error_text),
                _ => StoreError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Insert one row, returning the persisted representation.
    pub async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, StoreError> {
        let path = format!("{}/{}", REST_PREFIX, table);
        self.request(Method::POST, &path, Some(row), true).await
    }

    pub async fn select_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        let path = format!("{}/{}", REST_PREFIX, table);
        self.request(Method::GET, &path, None, false).await
    }

    pub async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: impl std::fmt::Display,
    ) -> Result<Vec<Value>, StoreError> {
        let path = format!("{}/{}?{}=eq.{}", REST_PREFIX, table, column, value);
        self.request(Method::GET, &path, None, false).await
    }

    /// Equality select restricted to named columns (credential lookups pull
    /// only what the login flow needs).
    pub async fn select_eq_columns(
        &self,
        table: &str,
        column: &str,
        value: impl std::fmt::Display,
        columns: &[&str],
    ) -> Result<Vec<Value>, StoreError> {
        let path = format!(
            "{}/{}?{}=eq.{}&select={}",
            REST_PREFIX,
            table,
            column,
            value,
            columns.join(",")
        );
        self.request(Method::GET, &path, None, false).await
    }

    pub async fn update_eq(
        &self,
        table: &str,
        column: &str,
        value: impl std::fmt::Display,
        changes: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let path = format!("{}/{}?{}=eq.{}", REST_PREFIX, table, column, value);
        self.request(Method::PATCH, &path, Some(changes), true).await
    }

    /// Update constrained by several equality filters at once. Rows that no
    /// longer satisfy every filter are skipped, which is what makes the
    /// verification flip one-shot under concurrency.
    pub async fn update_where(
        &self,
        table: &str,
        filters: &[(&str, String)],
        changes: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let mut path = format!("{}/{}", REST_PREFIX, table);
        for (i, (column, value)) in filters.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            path.push_str(&format!("{}{}=eq.{}", sep, column, value));
        }
        self.request(Method::PATCH, &path, Some(changes), true).await
    }

    pub async fn delete_eq(
        &self,
        table: &str,
        column: &str,
        value: impl std::fmt::Display,
    ) -> Result<Vec<Value>, StoreError> {
        let path = format!("{}/{}?{}=eq.{}", REST_PREFIX, table, column, value);
        self.request(Method::DELETE, &path, None, true).await
    }
}

//! HTTP adapter for the Double Profit record store

use crate::config::EngineConfig;
use crate::error::{AppError, Result};
use crate::store::types::{Bill, Product};
use crate::store::RecordStore;
use async_trait::async_trait;
use reqwest::Client;

/// Record store client backed by the remote document API
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_headers(&self, auth_token: &str) -> Result<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Content-Type", "application/json".parse().unwrap());

        let token = auth_token.parse().map_err(|_| {
            AppError::Auth("Auth token contains invalid header characters".to_string())
        })?;
        headers.insert("auth-token", token);

        Ok(headers)
    }

    async fn get_collection<T>(&self, path: &str, auth_token: &str) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .headers(self.get_headers(auth_token)?)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Auth(
                "Record store rejected the auth token".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(AppError::Store(format!(
                "Record store returned status {} for {}",
                status.as_u16(),
                path
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_products(&self, auth_token: &str) -> Result<Vec<Product>> {
        self.get_collection("/api/products", auth_token).await
    }

    async fn list_bills(&self, auth_token: &str) -> Result<Vec<Bill>> {
        self.get_collection("/api/bills", auth_token).await
    }
}

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Thin JSON-over-HTTP client shared by the backend adapters
#[derive(Debug, Clone)]
pub struct BackendHttpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendHttpClient {
    pub fn new(base_url: String, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `{base_url}{path}` and decode the JSON reply.
    /// Non-2xx statuses are turned into errors carrying the response body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} returned HTTP {}: {}", url, status, body);
        }

        let result: T = response.json().await?;
        Ok(result)
    }
}

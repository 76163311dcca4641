use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use super::client::{ApiClient, Credentials};
use crate::error::{Error, Result};

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: CLOUDFLARE_API_BASE.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

pub struct CloudflareClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl CloudflareClient {
    pub fn new(credentials: Credentials, options: ClientOptions) -> Result<Self> {
        if options.timeout.is_zero() {
            return Err(Error::ZeroTimeout);
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            credentials,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Auth-Email", self.credentials.email())
            .header("X-Auth-Key", self.credentials.auth_key())
    }

    async fn send(&self, url: String, request: RequestBuilder) -> Result<Value> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        debug!("Response status from {}: {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status { url, status, body });
        }

        let text = response.text().await.map_err(|source| Error::Transport {
            url: url.clone(),
            source,
        })?;

        let value: Value = serde_json::from_str(&text).map_err(|source| Error::Decode {
            url: url.clone(),
            source,
        })?;

        unwrap_envelope(&url, value)
    }
}

/// Strips Cloudflare's `{success, errors, messages, result}` wrapper.
/// Bodies that carry no boolean `success` field are passed through untouched.
fn unwrap_envelope(url: &str, mut value: Value) -> Result<Value> {
    let success = match value.get("success").and_then(Value::as_bool) {
        Some(success) => success,
        None => return Ok(value),
    };

    if !success {
        return Err(Error::Api {
            url: url.to_string(),
            message: describe_errors(&value),
        });
    }

    Ok(value
        .get_mut("result")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

fn describe_errors(value: &Value) -> String {
    let messages: Vec<String> = value
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| {
                    let message = error.get("message").and_then(Value::as_str);
                    match (message, error.get("code")) {
                        (Some(message), Some(code)) => format!("{} (code {})", message, code),
                        (Some(message), None) => message.to_string(),
                        _ => error.to_string(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        "Unknown error".to_string()
    } else {
        messages.join("; ")
    }
}

#[async_trait]
impl ApiClient for CloudflareClient {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let request = self.client.get(&url).query(query);
        self.send(url, request).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        debug!("POST {} {}", url, body);

        let request = self.client.post(&url).json(body);
        self.send(url, request).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        debug!("PUT {} {}", url, body);

        let request = self.client.put(&url).json(body);
        self.send(url, request).await
    }
}

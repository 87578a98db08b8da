//! Thin wrapper over `reqwest` shared by the Jira and Confluence clients.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::Auth;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct Upstream {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl Upstream {
    pub fn new(base_url: &str, auth: &Auth, timeout: Duration) -> reqwest::Result<Self> {
        let auth_header = match auth {
            Auth::Basic {
                username,
                api_token,
            } => {
                let credentials = format!("{}:{}", username, api_token);
                format!("Basic {}", STANDARD.encode(credentials))
            }
            Auth::Bearer(token) => format!("Bearer {}", token),
        };

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "upstream request");

        self.client
            .request(method, &url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
    }

    /// Send the request and decode a JSON body. An empty body decodes as
    /// JSON `null`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
        target: &str,
    ) -> Result<T> {
        let text = self.send(request, operation, target).await?;
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };

        serde_json::from_str(body).map_err(|source| Error::Decode {
            operation,
            target: target.to_string(),
            source,
        })
    }

    /// Send the request and discard the body.
    pub async fn execute_empty(
        &self,
        request: RequestBuilder,
        operation: &'static str,
        target: &str,
    ) -> Result<()> {
        self.send(request, operation, target).await.map(|_| ())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        operation: &'static str,
        target: &str,
    ) -> Result<String> {
        let transport = |source| Error::Transport {
            operation,
            target: target.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(operation, resource = target, %status, "upstream returned an error");
            return Err(Error::Upstream {
                operation,
                target: target.to_string(),
                status,
                body,
            });
        }

        response.text().await.map_err(transport)
    }
}

// Copyright 2025 Ankra.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP client for the Ankra platform API

pub mod addons;
pub mod agent;
pub mod auth;
pub mod charts;
pub mod chat;
pub mod clusters;
pub mod credentials;
pub mod manifests;
pub mod operations;
pub mod organisations;
pub mod sops;
pub mod stacks;
pub mod tokens;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::constants::HTTP_TIMEOUT_SECS;
use crate::shared::error::{AnkraError, Result};

/// Pagination block returned by list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

/// Authenticated client for the Ankra REST API.
///
/// Holds the base URL (trailing slash trimmed) and the bearer token; every
/// request path is relative to `/api/v1` on that host.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json::<T>().await?)
    }

    /// POST a JSON body, discarding any response payload. Some endpoints
    /// answer 200 with an empty body, so nothing is parsed here.
    async fn post_json_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// POST without a request body, discarding any response payload.
    async fn post_unit(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// POST without a request body, parsing the response as JSON.
    async fn post_unit_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let resp = self
            .http
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// Map non-success responses to `AnkraError::Api` carrying the body text.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(AnkraError::Api {
            status: status.as_u16(),
            body: body.trim().to_string(),
        })
    }
}

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

//! Browser login flow endpoints. These run before any token exists, so they
//! live outside `ApiClient` and use a short-lived unauthenticated client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::constants::HTTP_TIMEOUT_SECS;
use crate::shared::error::{AnkraError, Result};

#[derive(Debug, Deserialize)]
pub struct LoginInitResponse {
    pub auth_url: String,
    pub state: String,
    #[serde(default)]
    pub auth0_domain: String,
}

#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    code: &'a str,
    state: &'a str,
    code_verifier: &'a str,
    machine_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenExchangeResponse {
    pub token: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub token_id: String,
    #[serde(default)]
    pub token_name: String,
}

fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?)
}

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

/// Start a browser login, registering the local redirect URI and the PKCE
/// challenge with the platform.
pub async fn login_init(
    base_url: &str,
    redirect_uri: &str,
    code_challenge: &str,
) -> Result<LoginInitResponse> {
    let mut url = url::Url::parse(&format!(
        "{}/api/v1/cli/login/init",
        base_url.trim_end_matches('/')
    ))?;
    url.query_pairs_mut()
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("code_challenge", code_challenge)
        .append_pair("base_url", base_url);
    let resp = client()?.get(url).send().await?;
    let resp = check_status(resp).await?;
    Ok(resp.json().await?)
}

/// Exchange the authorization code for a long-lived API token.
pub async fn exchange_token(
    base_url: &str,
    code: &str,
    state: &str,
    code_verifier: &str,
    machine_id: &str,
) -> Result<TokenExchangeResponse> {
    let body = TokenExchangeRequest {
        code,
        state,
        code_verifier,
        machine_id,
    };
    let resp = client()?
        .post(format!(
            "{}/api/v1/cli/login/token",
            base_url.trim_end_matches('/')
        ))
        .json(&body)
        .send()
        .await?;
    let resp = check_status(resp).await?;
    Ok(resp.json().await?)
}

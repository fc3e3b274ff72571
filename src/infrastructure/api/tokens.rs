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

//! API token lifecycle

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiToken {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub revoked_at: Option<String>,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(default)]
    pub revoked: bool,
}

#[derive(Debug, Serialize)]
struct CreateTokenRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedToken {
    pub id: String,
    /// Full secret value, shown exactly once at creation time.
    pub token: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default, rename = "type")]
    pub token_type: String,
}

impl ApiClient {
    pub async fn list_tokens(&self) -> Result<Vec<ApiToken>> {
        self.get_json("/api/v1/org/account/tokens").await
    }

    pub async fn create_token(
        &self,
        name: &str,
        expires_at: Option<&str>,
    ) -> Result<CreatedToken> {
        let body = CreateTokenRequest { name, expires_at };
        self.post_json("/api/v1/org/account/tokens", &body).await
    }

    pub async fn revoke_token(&self, token_id: &str) -> Result<()> {
        self.post_unit(&format!("/api/v1/org/account/tokens/{token_id}/revoke"))
            .await
    }

    pub async fn delete_token(&self, token_id: &str) -> Result<()> {
        self.delete(&format!("/api/v1/org/account/tokens/{token_id}"))
            .await
    }
}

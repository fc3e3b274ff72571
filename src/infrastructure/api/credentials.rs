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

//! Stored provider credentials

use serde::Deserialize;

use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialValidation {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    pub async fn list_credentials(&self, provider: Option<&str>) -> Result<Vec<Credential>> {
        let path = match provider {
            Some(p) => format!("/api/v1/org/credentials?provider={p}"),
            None => "/api/v1/org/credentials".to_string(),
        };
        self.get_json(&path).await
    }

    pub async fn get_credential(&self, credential_id: &str) -> Result<Credential> {
        self.get_json(&format!("/api/v1/org/credentials/{credential_id}"))
            .await
    }

    pub async fn validate_credential(&self, credential_name: &str) -> Result<CredentialValidation> {
        self.get_json(&format!(
            "/api/v1/org/credentials/validate?credential_name={credential_name}"
        ))
        .await
    }

    pub async fn delete_credential(
        &self,
        credential_id: &str,
        organisation_id: &str,
    ) -> Result<()> {
        self.delete(&format!(
            "/api/v1/org/credentials/{credential_id}?organisation_id={organisation_id}"
        ))
        .await
    }
}

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

//! Organisation membership and switching

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Organisation {
    pub organisation_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_current: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationMember {
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub joined_at: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationDetails {
    pub organisation_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub members: Vec<OrganisationMember>,
}

#[derive(Debug, Serialize)]
struct SwitchOrganisationRequest<'a> {
    organisation_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateOrganisationRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganisationResponse {
    pub organisation_id: String,
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    /// All organisations the authenticated user belongs to. The endpoint
    /// returns a bare JSON array.
    pub async fn list_organisations(&self) -> Result<Vec<Organisation>> {
        self.get_json("/api/v1/org/organisation").await
    }

    pub async fn get_organisation(&self, organisation_id: &str) -> Result<OrganisationDetails> {
        self.get_json(&format!("/api/v1/org/organisation/{organisation_id}"))
            .await
    }

    pub async fn switch_organisation(&self, organisation_id: &str) -> Result<()> {
        let body = SwitchOrganisationRequest { organisation_id };
        self.post_json_unit("/api/v1/org/organisation/switch", &body)
            .await
    }

    pub async fn create_organisation(
        &self,
        name: &str,
        country: Option<&str>,
    ) -> Result<CreateOrganisationResponse> {
        let body = CreateOrganisationRequest { name, country };
        self.post_json("/api/v1/org/organisation", &body).await
    }
}

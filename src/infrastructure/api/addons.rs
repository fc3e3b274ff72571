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

//! Installed and available addons, addon settings

use serde::{Deserialize, Serialize};

use super::{ApiClient, Pagination};
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct InstalledAddon {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub chart_name: String,
    #[serde(default)]
    pub chart_version: String,
    #[serde(default)]
    pub repository_url: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub through_ankra: bool,
}

#[derive(Debug, Deserialize)]
pub struct InstalledAddonListResponse {
    #[serde(default)]
    pub result: Vec<InstalledAddon>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailableAddon {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chart_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvailableAddonListResponse {
    #[serde(default)]
    result: Vec<AvailableAddon>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonSettingsValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonSettings {
    #[serde(default)]
    pub addon_name: String,
    #[serde(default)]
    pub settings: AddonSettingsValues,
}

impl ApiClient {
    pub async fn list_addons(&self, cluster_id: &str) -> Result<InstalledAddonListResponse> {
        self.get_json(&format!("/api/v1/clusters/{cluster_id}/addons"))
            .await
    }

    pub async fn list_available_addons(&self, cluster_id: &str) -> Result<Vec<AvailableAddon>> {
        let resp: AvailableAddonListResponse = self
            .get_json(&format!(
                "/api/v1/org/clusters/imported/{cluster_id}/addons/available"
            ))
            .await?;
        Ok(resp.result)
    }

    pub async fn get_addon_settings(
        &self,
        cluster_id: &str,
        addon_name: &str,
    ) -> Result<AddonSettings> {
        self.get_json(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/addons/{addon_name}/settings"
        ))
        .await
    }

    /// Remove an addon; `delete_permanently` controls whether the release is
    /// uninstalled from the cluster or only removed from management.
    pub async fn delete_addon(
        &self,
        cluster_id: &str,
        resource_id: &str,
        delete_permanently: bool,
    ) -> Result<()> {
        self.delete(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/addons/{resource_id}?delete={delete_permanently}"
        ))
        .await
    }
}

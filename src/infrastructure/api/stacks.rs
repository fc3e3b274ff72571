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

//! Stack inspection and management on imported clusters

use serde::{Deserialize, Serialize};

use super::clusters::Parent;
use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackManifest {
    pub name: String,
    #[serde(default)]
    pub manifest_base64: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub parents: Vec<Parent>,
    #[serde(default)]
    pub delete_permanently: bool,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackAddonConfiguration {
    #[serde(default)]
    pub values_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackAddon {
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
    pub configuration_type: String,
    #[serde(default)]
    pub configuration: Option<StackAddonConfiguration>,
    #[serde(default)]
    pub parents: Vec<Parent>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub chart_icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stack {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manifests: Vec<StackManifest>,
    #[serde(default)]
    pub addons: Vec<StackAddon>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub delete_permanently: bool,
}

#[derive(Debug, Deserialize)]
pub struct StackListResponse {
    #[serde(default)]
    pub stacks: Vec<Stack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StackHistoryEntry {
    pub id: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub change_type: String,
}

#[derive(Debug, Deserialize)]
pub struct StackHistoryResponse {
    #[serde(default)]
    pub stack_name: String,
    #[serde(default)]
    pub history: Vec<StackHistoryEntry>,
}

#[derive(Debug, Serialize)]
struct CreateStackRequest<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct RenameStackRequest<'a> {
    new_name: &'a str,
}

impl ApiClient {
    pub async fn list_stacks(&self, cluster_id: &str) -> Result<Vec<Stack>> {
        let resp: StackListResponse = self
            .get_json(&format!("/api/v1/clusters/{cluster_id}/stacks"))
            .await?;
        Ok(resp.stacks)
    }

    pub async fn stack_history(
        &self,
        cluster_id: &str,
        stack_name: &str,
    ) -> Result<StackHistoryResponse> {
        self.get_json(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/stacks/{stack_name}/history"
        ))
        .await
    }

    pub async fn create_stack(
        &self,
        cluster_id: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let body = CreateStackRequest { name, description };
        self.post_json_unit(
            &format!("/api/v1/org/clusters/imported/{cluster_id}/stacks"),
            &body,
        )
        .await
    }

    pub async fn delete_stack(&self, cluster_id: &str, stack_name: &str) -> Result<()> {
        self.delete(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/stacks/{stack_name}"
        ))
        .await
    }

    pub async fn rename_stack(
        &self,
        cluster_id: &str,
        stack_name: &str,
        new_name: &str,
    ) -> Result<()> {
        let body = RenameStackRequest { new_name };
        self.post_json_unit(
            &format!(
                "/api/v1/org/clusters/imported/{cluster_id}/stacks/{stack_name}/rename-stack"
            ),
            &body,
        )
        .await
    }
}

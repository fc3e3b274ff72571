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

//! Cluster listing, lookup, import, deletion and reconcile

use serde::{Deserialize, Serialize};

use super::{ApiClient, Pagination};
use crate::shared::error::{AnkraError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterListItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub organisation_id: String,
    #[serde(default)]
    pub kube_distribution: String,
    #[serde(default)]
    pub kube_version: String,
    #[serde(default)]
    pub control_planes: u32,
    #[serde(default)]
    pub nodes: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub incoming_networks: Vec<String>,
    #[serde(default)]
    pub outgoing_networks: Vec<String>,
    #[serde(default)]
    pub operational_at: Option<String>,
    #[serde(default)]
    pub slated_for_deletion_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// List item plus the optional status field returned by name lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterWithStatus {
    #[serde(flatten)]
    pub cluster: ClusterListItem,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClusterListResponse {
    #[serde(default)]
    pub result: Vec<ClusterListItem>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct ClusterLookupResponse {
    #[serde(default)]
    result: Vec<ClusterWithStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parent {
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GitRepositoryRequest {
    pub provider: String,
    pub credential_name: String,
    pub branch: String,
    pub repository: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestRequest {
    pub name: String,
    pub manifest_base64: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub parents: Vec<Parent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub encrypted_paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonProfileInput {
    pub key: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonProfile {
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub revision: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<AddonProfileInput>,
}

/// Addon configuration payload, shaped by `configuration_type`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AddonConfigurationRequest {
    Standalone {
        #[serde(skip_serializing_if = "String::is_empty")]
        values_base64: String,
    },
    Profile {
        profile: AddonProfile,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AddonRequest {
    pub name: String,
    pub chart_name: String,
    pub chart_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub repository_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub configuration_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<AddonConfigurationRequest>,
    pub parents: Vec<Parent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StackRequest {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub manifests: Vec<ManifestRequest>,
    pub addons: Vec<AddonRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportClusterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepositoryRequest>,
    pub stacks: Vec<StackRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateImportClusterRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub spec: ImportClusterSpec,
}

#[derive(Debug, Deserialize)]
pub struct ImportValidationDetail {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportValidationError {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub errors: Vec<ImportValidationDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub import_command: String,
    #[serde(default)]
    pub errors: Vec<ImportValidationError>,
}

#[derive(Debug, Deserialize)]
pub struct ReconcileResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    pub async fn list_clusters(&self, page: u32, page_size: u32) -> Result<ClusterListResponse> {
        self.get_json(&format!(
            "/api/v1/clusters?page={page}&page_size={page_size}"
        ))
        .await
    }

    /// Look up a single cluster by its exact name.
    pub async fn get_cluster_by_name(&self, name: &str) -> Result<ClusterWithStatus> {
        let resp: ClusterLookupResponse = self
            .get_json(&format!("/api/v1/clusters?cluster_name={name}"))
            .await?;
        resp.result
            .into_iter()
            .find(|c| c.cluster.name == name)
            .ok_or_else(|| AnkraError::not_found("cluster", name))
    }

    pub async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.delete(&format!("/api/v1/clusters/{name}")).await
    }

    pub async fn import_cluster(
        &self,
        request: &CreateImportClusterRequest,
    ) -> Result<ImportResponse> {
        self.post_json("/api/v1/clusters/import", request).await
    }

    pub async fn reconcile_cluster(&self, cluster_id: &str) -> Result<ReconcileResponse> {
        self.post_unit_json(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/reconcile"
        ))
        .await
    }
}

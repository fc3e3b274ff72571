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

//! Manifests deployed on a cluster

use serde::Deserialize;

use super::clusters::Parent;
use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterManifest {
    pub name: String,
    #[serde(default)]
    pub manifest_base64: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub parents: Vec<Parent>,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Deserialize)]
struct ManifestListResponse {
    #[serde(default)]
    manifests: Vec<ClusterManifest>,
}

impl ApiClient {
    pub async fn list_manifests(&self, cluster_id: &str) -> Result<Vec<ClusterManifest>> {
        let resp: ManifestListResponse = self
            .get_json(&format!("/api/v1/clusters/{cluster_id}/manifests"))
            .await?;
        Ok(resp.manifests)
    }
}

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

//! Cluster agent status, tokens and upgrades

use serde::Deserialize;

use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct AgentInfo {
    pub id: String,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub connected_at: Option<String>,
    #[serde(default)]
    pub healthy: bool,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub upgrade_available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentToken {
    pub token: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub cluster_id: String,
}

impl ApiClient {
    pub async fn get_agent(&self, cluster_id: &str) -> Result<AgentInfo> {
        self.get_json(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/agent"
        ))
        .await
    }

    pub async fn get_agent_token(&self, cluster_id: &str) -> Result<AgentToken> {
        self.get_json(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/cluster-agent/token"
        ))
        .await
    }

    pub async fn rotate_agent_token(&self, cluster_id: &str) -> Result<AgentToken> {
        self.post_unit_json(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/cluster-agent/token"
        ))
        .await
    }

    pub async fn upgrade_agent(&self, cluster_id: &str) -> Result<()> {
        self.post_unit(&format!(
            "/api/v1/org/clusters/imported/{cluster_id}/agent/upgrade"
        ))
        .await
    }
}

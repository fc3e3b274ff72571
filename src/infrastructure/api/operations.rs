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

//! Cluster operations and their jobs

use serde::Deserialize;

use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationInformation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusUpdate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailedJobInformation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OperationJobsResponse {
    #[serde(default)]
    pub operation_information: Option<OperationInformation>,
    #[serde(default)]
    pub jobs: Vec<JobStatusUpdate>,
    #[serde(default)]
    pub detailed_job_information: Vec<DetailedJobInformation>,
}

impl ApiClient {
    /// Write operations for a cluster, newest first. The endpoint returns a
    /// bare JSON array rather than a result envelope.
    pub async fn list_operations(&self, cluster_id: &str) -> Result<Vec<Operation>> {
        self.get_json(&format!(
            "/api/v1/clusters/{cluster_id}/operations?type_list=write"
        ))
        .await
    }

    pub async fn operation_jobs(
        &self,
        cluster_id: &str,
        operation_id: &str,
    ) -> Result<OperationJobsResponse> {
        self.get_json(&format!(
            "/api/v1/clusters/{cluster_id}/operations/{operation_id}/jobs"
        ))
        .await
    }

    pub async fn cancel_operation(&self, operation_id: &str) -> Result<()> {
        self.post_unit(&format!("/api/v1/org/operations/{operation_id}/cancel"))
            .await
    }

    pub async fn cancel_job(&self, operation_id: &str, job_id: &str) -> Result<()> {
        self.post_unit(&format!(
            "/api/v1/org/operations/{operation_id}/jobs/{job_id}/cancel"
        ))
        .await
    }
}

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

//! Helm chart catalogue

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub chart_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repository_name: String,
    #[serde(default)]
    pub repository_url: String,
    #[serde(default)]
    pub repository_id: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub registry_credential_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartPagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChartListResponse {
    #[serde(default)]
    pub charts: Vec<Chart>,
    #[serde(default)]
    pub pagination: ChartPagination,
}

#[derive(Debug, Serialize)]
struct ChartDetailsRequest<'a> {
    chart_name: &'a str,
    repository_url: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartProfile {
    pub profile_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartDetails {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub repository_name: String,
    #[serde(default)]
    pub repository_url: String,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub profiles: Vec<ChartProfile>,
}

impl ApiClient {
    pub async fn list_charts(
        &self,
        page: u32,
        page_size: u32,
        only_subscribed: bool,
    ) -> Result<ChartListResponse> {
        self.get_json(&format!(
            "/api/v1/org/stacks/charts?page={page}&page_size={page_size}&only_subscribed={only_subscribed}"
        ))
        .await
    }

    pub async fn chart_details(
        &self,
        chart_name: &str,
        repository_url: &str,
    ) -> Result<ChartDetails> {
        let body = ChartDetailsRequest {
            chart_name,
            repository_url,
        };
        self.post_json("/api/v1/org/stacks/charts/details", &body)
            .await
    }
}

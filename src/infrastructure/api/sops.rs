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

//! Server-side SOPS encryption of manifest values

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::shared::error::Result;

#[derive(Debug, Serialize)]
struct EncryptRequest<'a> {
    yaml_content: &'a str,
    encrypted_paths: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct EncryptResponse {
    #[serde(default)]
    pub encrypted_yaml: String,
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Serialize)]
struct DecryptRequest<'a> {
    yaml_content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct DecryptResponse {
    #[serde(default)]
    pub decrypted_yaml: String,
    #[serde(default)]
    pub success: bool,
}

impl ApiClient {
    pub async fn sops_encrypt(
        &self,
        yaml_content: &str,
        encrypted_paths: &[String],
    ) -> Result<EncryptResponse> {
        let body = EncryptRequest {
            yaml_content,
            encrypted_paths,
        };
        self.post_json("/api/v1/org/sops/encrypt", &body).await
    }

    pub async fn sops_decrypt(&self, yaml_content: &str) -> Result<DecryptResponse> {
        let body = DecryptRequest { yaml_content };
        self.post_json("/api/v1/org/sops/decrypt", &body).await
    }
}

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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, AnkraError>;

#[derive(Error, Debug)]
pub enum AnkraError {
    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {resource_type} '{name}'")]
    NotFound { resource_type: String, name: String },

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl AnkraError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn not_found(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// True when the server answered with the given HTTP status.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, Self::Api { status, .. } if *status == code)
    }
}

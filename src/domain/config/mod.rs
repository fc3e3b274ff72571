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

//! Local configuration and selection state.
//!
//! Credentials live in `~/.ankra.yaml`; transient selections (current
//! cluster, current organisation) live as JSON under `~/.ankra/`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::infrastructure::constants::{
    CONFIG_FILE_NAME, DEFAULT_BASE_URL, ENV_API_TOKEN, ENV_BASE_URL, SELECTED_CLUSTER_FILE,
    SELECTED_ORG_FILE, STATE_DIR_NAME,
};
use crate::shared::error::{AnkraError, Result};

/// Contents of `~/.ankra.yaml`, written by `ankra login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(
        rename = "base-url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
}

impl CliConfig {
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AnkraError::config_error("could not determine home directory"))?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }
}

/// Resolved connection settings for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub token: String,
    pub base_url: String,
}

impl Context {
    /// Precedence: command-line flags, then environment, then the config
    /// file, then the platform default base URL.
    pub fn resolve(
        flag_token: Option<&str>,
        flag_base_url: Option<&str>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => CliConfig::default_path()?,
        };
        let config = CliConfig::load(&path)?;

        let token = flag_token
            .map(str::to_string)
            .or_else(|| std::env::var(ENV_API_TOKEN).ok().filter(|v| !v.is_empty()))
            .or(config.token.filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                AnkraError::AuthError(format!(
                    "no API token found; run 'ankra login' or set {ENV_API_TOKEN}"
                ))
            })?;

        let base_url = flag_base_url
            .map(str::to_string)
            .or_else(|| std::env::var(ENV_BASE_URL).ok().filter(|v| !v.is_empty()))
            .or(config.base_url.filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { token, base_url })
    }

    /// Like `resolve` but tolerates a missing token, for commands that only
    /// need the base URL.
    pub fn resolve_base_url(flag_base_url: Option<&str>, config_path: Option<&Path>) -> String {
        if let Some(url) = flag_base_url {
            return url.to_string();
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.is_empty() {
                return url;
            }
        }
        let loaded = config_path
            .map(Path::to_path_buf)
            .or_else(|| CliConfig::default_path().ok())
            .and_then(|p| CliConfig::load(&p).ok())
            .and_then(|c| c.base_url.filter(|v| !v.is_empty()));
        loaded.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

fn state_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AnkraError::config_error("could not determine home directory"))?;
    Ok(home.join(STATE_DIR_NAME))
}

fn load_state<T: serde::de::DeserializeOwned>(file_name: &str) -> Result<Option<T>> {
    let path = state_dir()?.join(file_name);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

fn save_state<T: Serialize>(file_name: &str, value: &T) -> Result<()> {
    let dir = state_dir()?;
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(file_name), serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn clear_state(file_name: &str) -> Result<()> {
    let path = state_dir()?.join(file_name);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// The cluster subsequent commands default to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedCluster {
    pub id: String,
    pub name: String,
}

impl SelectedCluster {
    pub fn load() -> Result<Option<Self>> {
        load_state(SELECTED_CLUSTER_FILE)
    }

    pub fn save(&self) -> Result<()> {
        save_state(SELECTED_CLUSTER_FILE, self)
    }

    pub fn clear() -> Result<()> {
        clear_state(SELECTED_CLUSTER_FILE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOrganisation {
    pub organisation_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl SelectedOrganisation {
    pub fn load() -> Result<Option<Self>> {
        load_state(SELECTED_ORG_FILE)
    }

    pub fn save(&self) -> Result<()> {
        save_state(SELECTED_ORG_FILE, self)
    }

    pub fn clear() -> Result<()> {
        clear_state(SELECTED_ORG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".ankra.yaml");

        let config = CliConfig {
            token: Some("tok-123".into()),
            base_url: Some("https://staging.ankra.app".into()),
            token_id: None,
            token_name: Some("laptop-alice".into()),
            machine_id: None,
        };
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("tok-123"));
        assert_eq!(loaded.base_url.as_deref(), Some("https://staging.ankra.app"));
        assert_eq!(loaded.token_name.as_deref(), Some("laptop-alice"));
    }

    #[test]
    fn test_load_missing_config_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = CliConfig::load(&dir.path().join("nope.yaml")).unwrap();
        assert!(loaded.token.is_none());
        assert!(loaded.base_url.is_none());
    }

    #[test]
    fn test_flag_token_wins_over_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".ankra.yaml");
        CliConfig {
            token: Some("from-file".into()),
            base_url: Some("https://from-file.ankra.app".into()),
            ..Default::default()
        }
        .save(&path)
        .unwrap();

        let ctx = Context::resolve(Some("from-flag"), None, Some(&path)).unwrap();
        assert_eq!(ctx.token, "from-flag");
        assert_eq!(ctx.base_url, "https://from-file.ankra.app");
    }

    #[test]
    fn test_missing_token_is_auth_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".ankra.yaml");
        let err = Context::resolve(None, None, Some(&path)).unwrap_err();
        assert!(matches!(err, AnkraError::AuthError(_)));
    }

    #[test]
    fn test_default_base_url_applies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".ankra.yaml");
        CliConfig {
            token: Some("tok".into()),
            ..Default::default()
        }
        .save(&path)
        .unwrap();

        let ctx = Context::resolve(None, None, Some(&path)).unwrap();
        assert_eq!(ctx.base_url, DEFAULT_BASE_URL);
    }
}

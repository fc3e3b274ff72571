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

//! The ImportCluster YAML document and its translation into an import
//! request.
//!
//! Manifest bodies and addon values may be inlined or referenced through
//! `from_file` paths relative to the cluster file; both end up base64
//! encoded on the wire.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::infrastructure::api::clusters::{
    AddonConfigurationRequest, AddonProfile, AddonRequest, CreateImportClusterRequest,
    GitRepositoryRequest, ImportClusterSpec, ManifestRequest, Parent, StackRequest,
};
use crate::shared::error::{AnkraError, Result};

pub const IMPORT_CLUSTER_KIND: &str = "ImportCluster";

pub const CONFIGURATION_TYPE_STANDALONE: &str = "standalone";
pub const CONFIGURATION_TYPE_PROFILE: &str = "profile";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportClusterConfig {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: ClusterMetadata,
    pub spec: ClusterSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepositoryConfig>,
    #[serde(default)]
    pub stacks: Vec<StackConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRepositoryConfig {
    pub provider: String,
    pub credential_name: String,
    pub branch: String,
    pub repository: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifests: Vec<ManifestConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<AddonConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ParentConfig>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from_file: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub manifest: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub encrypted_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonConfig {
    pub name: String,
    #[serde(default)]
    pub chart_name: String,
    #[serde(default)]
    pub chart_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub configuration_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_yaml::Mapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ParentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentConfig {
    pub name: String,
    pub kind: String,
}

impl AddonConfig {
    /// The `from_file` reference inside the configuration mapping, if any.
    pub fn config_from_file(&self) -> Option<String> {
        self.configuration
            .as_ref()?
            .get("from_file")?
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn inline_values(&self) -> Option<String> {
        self.configuration
            .as_ref()?
            .get("values")?
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Keys already listed under `configuration.encrypted_paths`.
    pub fn encrypted_paths(&self) -> Vec<String> {
        let Some(config) = self.configuration.as_ref() else {
            return Vec::new();
        };
        match config.get("encrypted_paths").and_then(|v| v.as_sequence()) {
            Some(seq) => seq
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn add_encrypted_path(&mut self, key: &str) {
        let mut paths = self.encrypted_paths();
        paths.push(key.to_string());
        let config = self.configuration.get_or_insert_with(serde_yaml::Mapping::new);
        config.insert(
            serde_yaml::Value::from("encrypted_paths"),
            serde_yaml::Value::from(paths),
        );
    }
}

impl ImportClusterConfig {
    /// Parse and validate the document kind.
    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        if config.kind != IMPORT_CLUSTER_KIND {
            return Err(AnkraError::InvalidResource(format!(
                "expected kind={IMPORT_CLUSTER_KIND}, got {:?}",
                config.kind
            )));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AnkraError::InvalidResource(format!("cannot read {path:?}: {e}")))?;
        Self::parse(&raw)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn find_manifest_mut(&mut self, name: &str) -> Option<&mut ManifestConfig> {
        self.spec
            .stacks
            .iter_mut()
            .flat_map(|s| s.manifests.iter_mut())
            .find(|m| m.name == name)
    }

    pub fn find_addon_mut(&mut self, name: &str) -> Option<&mut AddonConfig> {
        self.spec
            .stacks
            .iter_mut()
            .flat_map(|s| s.addons.iter_mut())
            .find(|a| a.name == name)
    }

    /// Assemble the wire request, resolving `from_file` references relative
    /// to `base_dir` and base64-encoding all content.
    pub fn to_import_request(&self, base_dir: &Path) -> Result<CreateImportClusterRequest> {
        if self.metadata.name.is_empty() {
            return Err(AnkraError::InvalidResource(
                "metadata.name is required".into(),
            ));
        }

        let git_repository = self.spec.git_repository.as_ref().map(|g| GitRepositoryRequest {
            provider: g.provider.clone(),
            credential_name: g.credential_name.clone(),
            branch: g.branch.clone(),
            repository: g.repository.clone(),
        });

        let mut stacks = Vec::with_capacity(self.spec.stacks.len());
        for stack in &self.spec.stacks {
            stacks.push(build_stack(stack, base_dir)?);
        }

        Ok(CreateImportClusterRequest {
            name: self.metadata.name.clone(),
            description: self.metadata.description.clone(),
            spec: ImportClusterSpec {
                git_repository,
                stacks,
            },
        })
    }
}

fn build_stack(stack: &StackConfig, base_dir: &Path) -> Result<StackRequest> {
    if stack.name.is_empty() {
        return Err(AnkraError::InvalidResource("stack.name is required".into()));
    }

    let mut manifests = Vec::with_capacity(stack.manifests.len());
    for manifest in &stack.manifests {
        manifests.push(build_manifest(manifest, base_dir).map_err(|e| {
            AnkraError::InvalidResource(format!("stack {:?}: {e}", stack.name))
        })?);
    }

    let mut addons = Vec::with_capacity(stack.addons.len());
    for addon in &stack.addons {
        addons.push(build_addon(addon, base_dir).map_err(|e| {
            AnkraError::InvalidResource(format!("stack {:?}: {e}", stack.name))
        })?);
    }

    Ok(StackRequest {
        name: stack.name.clone(),
        description: stack.description.clone(),
        manifests,
        addons,
    })
}

fn build_manifest(manifest: &ManifestConfig, base_dir: &Path) -> Result<ManifestRequest> {
    if manifest.name.is_empty() {
        return Err(AnkraError::InvalidResource(
            "manifest.name is required".into(),
        ));
    }

    // Inline content wins over from_file.
    let content = if !manifest.manifest.is_empty() {
        manifest.manifest.clone().into_bytes()
    } else if !manifest.from_file.is_empty() {
        let full = base_dir.join(&manifest.from_file);
        fs::read(&full)
            .map_err(|e| AnkraError::InvalidResource(format!("read manifest {full:?}: {e}")))?
    } else {
        return Err(AnkraError::InvalidResource(format!(
            "manifest {:?}: either manifest or from_file must be set",
            manifest.name
        )));
    };

    Ok(ManifestRequest {
        name: manifest.name.clone(),
        manifest_base64: STANDARD.encode(content),
        namespace: if manifest.namespace.is_empty() {
            None
        } else {
            Some(manifest.namespace.clone())
        },
        parents: convert_parents(&manifest.parents),
        encrypted_paths: manifest.encrypted_paths.clone(),
    })
}

fn build_addon(addon: &AddonConfig, base_dir: &Path) -> Result<AddonRequest> {
    if addon.name.is_empty() {
        return Err(AnkraError::InvalidResource("addon.name is required".into()));
    }

    let configuration = match addon.configuration_type.as_str() {
        CONFIGURATION_TYPE_STANDALONE => {
            if let Some(from_file) = addon.config_from_file() {
                let full = base_dir.join(&from_file);
                let content = fs::read(&full).map_err(|e| {
                    AnkraError::InvalidResource(format!("read addon configuration {full:?}: {e}"))
                })?;
                Some(AddonConfigurationRequest::Standalone {
                    values_base64: STANDARD.encode(content),
                })
            } else {
                addon
                    .inline_values()
                    .map(|values| AddonConfigurationRequest::Standalone {
                        values_base64: STANDARD.encode(values),
                    })
            }
        }
        CONFIGURATION_TYPE_PROFILE => match addon.config_from_file() {
            Some(from_file) => {
                let full = base_dir.join(&from_file);
                let raw = fs::read_to_string(&full).map_err(|e| {
                    AnkraError::InvalidResource(format!("read addon profile {full:?}: {e}"))
                })?;
                let profile: AddonProfile = serde_yaml::from_str(&raw).map_err(|e| {
                    AnkraError::InvalidResource(format!("parse addon profile {full:?}: {e}"))
                })?;
                Some(AddonConfigurationRequest::Profile { profile })
            }
            None => None,
        },
        _ => None,
    };

    Ok(AddonRequest {
        name: addon.name.clone(),
        chart_name: addon.chart_name.clone(),
        chart_version: addon.chart_version.clone(),
        repository_url: addon.repository_url.clone(),
        namespace: if addon.namespace.is_empty() {
            None
        } else {
            Some(addon.namespace.clone())
        },
        configuration_type: addon.configuration_type.clone(),
        configuration,
        parents: convert_parents(&addon.parents),
    })
}

fn convert_parents(parents: &[ParentConfig]) -> Vec<Parent> {
    parents
        .iter()
        .map(|p| Parent {
            name: p.name.clone(),
            kind: p.kind.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
apiVersion: v1
kind: ImportCluster
metadata:
  name: staging-cluster
  description: Staging environment
spec:
  stacks:
    - name: monitoring
      manifests:
        - name: alert-rules
          from_file: manifests/alerts.yaml
          namespace: monitoring
      addons:
        - name: grafana
          chart_name: grafana
          chart_version: 7.3.0
          repository_url: https://grafana.github.io/helm-charts
          configuration_type: standalone
          configuration:
            values: |
              adminPassword: secret
          parents:
            - name: alert-rules
              kind: manifest
"#;

    #[test]
    fn test_parse_rejects_wrong_kind() {
        let raw = SAMPLE.replace("ImportCluster", "Cluster");
        let err = ImportClusterConfig::parse(&raw).unwrap_err();
        assert!(matches!(err, AnkraError::InvalidResource(_)));
    }

    #[test]
    fn test_to_import_request_encodes_file_content() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("manifests")).unwrap();
        std::fs::write(
            dir.path().join("manifests/alerts.yaml"),
            "kind: ConfigMap\n",
        )
        .unwrap();

        let config = ImportClusterConfig::parse(SAMPLE).unwrap();
        let request = config.to_import_request(dir.path()).unwrap();

        assert_eq!(request.name, "staging-cluster");
        assert_eq!(request.spec.stacks.len(), 1);
        let manifest = &request.spec.stacks[0].manifests[0];
        assert_eq!(manifest.manifest_base64, STANDARD.encode("kind: ConfigMap\n"));
        assert_eq!(manifest.namespace.as_deref(), Some("monitoring"));

        let addon = &request.spec.stacks[0].addons[0];
        assert_eq!(addon.parents[0].name, "alert-rules");
        match addon.configuration.as_ref().unwrap() {
            AddonConfigurationRequest::Standalone { values_base64 } => {
                assert_eq!(values_base64, &STANDARD.encode("adminPassword: secret\n"));
            }
            other => panic!("unexpected configuration: {other:?}"),
        }
    }

    #[test]
    fn test_missing_manifest_source_is_an_error() {
        let raw = SAMPLE.replace("          from_file: manifests/alerts.yaml\n", "");
        let config = ImportClusterConfig::parse(&raw).unwrap();
        assert!(config.spec.stacks[0].manifests[0].from_file.is_empty());

        let dir = TempDir::new().unwrap();
        let err = config.to_import_request(dir.path()).unwrap_err();
        assert!(err.to_string().contains("from_file"));
    }

    #[test]
    fn test_inline_manifest_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let raw = SAMPLE.replace(
            "from_file: manifests/alerts.yaml",
            "manifest: \"kind: Secret\"",
        );
        let config = ImportClusterConfig::parse(&raw).unwrap();
        let request = config.to_import_request(dir.path()).unwrap();
        assert_eq!(
            request.spec.stacks[0].manifests[0].manifest_base64,
            STANDARD.encode("kind: Secret")
        );
    }

    #[test]
    fn test_encrypted_paths_round_trip_on_addon() {
        let mut addon = AddonConfig {
            name: "grafana".into(),
            ..Default::default()
        };
        assert!(addon.encrypted_paths().is_empty());
        addon.add_encrypted_path("adminPassword");
        addon.add_encrypted_path("dbPassword");
        assert_eq!(
            addon.encrypted_paths(),
            vec!["adminPassword".to_string(), "dbPassword".to_string()]
        );
    }
}

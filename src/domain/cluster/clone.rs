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

//! Cloning stacks between ImportCluster files.
//!
//! The merge itself is pure; fetching the source document and copying the
//! files it references is handled by [`CloneSource`] so the same logic
//! covers local paths and http(s) URLs.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use url::Url;

use super::import::{ImportClusterConfig, StackConfig, IMPORT_CLUSTER_KIND};
use crate::domain::cluster::import::{ClusterMetadata, ClusterSpec};
use crate::shared::error::{AnkraError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct CloneOptions {
    /// Replace all stacks in the target before merging.
    pub clean: bool,
    /// Merge even when stack, manifest or addon names conflict.
    pub force: bool,
    /// Copy referenced files for skipped stacks when missing.
    pub copy_missing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackAction {
    Added,
    Replaced,
    Skipped {
        name_conflict: bool,
        manifest_conflicts: Vec<String>,
        addon_conflicts: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct StackDecision {
    pub stack_name: String,
    pub action: StackAction,
}

#[derive(Debug, Default)]
pub struct MergeReport {
    pub decisions: Vec<StackDecision>,
}

impl MergeReport {
    pub fn added(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| !matches!(d.action, StackAction::Skipped { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.decisions.len() - self.added()
    }
}

/// Derive the target cluster name from the source name.
pub fn derive_clone_name(existing: &str) -> String {
    if existing.contains("-cluster") {
        existing.replacen("-cluster", "-cloned-cluster", 1)
    } else {
        format!("{existing}-cloned")
    }
}

/// Fresh target document when the destination file does not exist yet.
pub fn scaffold_target(source: &ImportClusterConfig) -> ImportClusterConfig {
    ImportClusterConfig {
        api_version: "v1".to_string(),
        kind: IMPORT_CLUSTER_KIND.to_string(),
        metadata: ClusterMetadata {
            name: derive_clone_name(&source.metadata.name),
            description: "Cloned cluster".to_string(),
        },
        spec: ClusterSpec {
            git_repository: source.spec.git_repository.clone(),
            stacks: Vec::new(),
        },
    }
}

/// Merge the source stacks into the target, honouring the conflict rules.
///
/// Manifest and addon names are checked globally across all target stacks,
/// including ones merged earlier in the same run.
pub fn merge_stacks(
    source: &ImportClusterConfig,
    target: &mut ImportClusterConfig,
    options: &CloneOptions,
) -> MergeReport {
    if options.clean {
        target.spec.stacks.clear();
    }

    let initial_names: HashSet<String> = target
        .spec
        .stacks
        .iter()
        .map(|s| s.name.clone())
        .collect();

    let mut report = MergeReport::default();

    for stack in &source.spec.stacks {
        let name_exists = initial_names.contains(&stack.name);

        if name_exists && !options.force {
            report.decisions.push(StackDecision {
                stack_name: stack.name.clone(),
                action: StackAction::Skipped {
                    name_conflict: true,
                    manifest_conflicts: Vec::new(),
                    addon_conflicts: Vec::new(),
                },
            });
            continue;
        }

        if !options.force {
            let (manifest_conflicts, addon_conflicts) =
                stack_conflicts(stack, &target.spec.stacks);
            if !manifest_conflicts.is_empty() || !addon_conflicts.is_empty() {
                report.decisions.push(StackDecision {
                    stack_name: stack.name.clone(),
                    action: StackAction::Skipped {
                        name_conflict: false,
                        manifest_conflicts,
                        addon_conflicts,
                    },
                });
                continue;
            }
        }

        if options.force && name_exists {
            if let Some(slot) = target
                .spec
                .stacks
                .iter_mut()
                .find(|s| s.name == stack.name)
            {
                *slot = stack.clone();
            }
            report.decisions.push(StackDecision {
                stack_name: stack.name.clone(),
                action: StackAction::Replaced,
            });
        } else {
            target.spec.stacks.push(stack.clone());
            report.decisions.push(StackDecision {
                stack_name: stack.name.clone(),
                action: StackAction::Added,
            });
        }
    }

    report
}

/// Manifest and addon names in `candidate` that collide with any stack in
/// `existing`.
pub fn stack_conflicts(
    candidate: &StackConfig,
    existing: &[StackConfig],
) -> (Vec<String>, Vec<String>) {
    let mut manifest_names = HashSet::new();
    let mut addon_names = HashSet::new();
    for stack in existing {
        manifest_names.extend(stack.manifests.iter().map(|m| m.name.as_str()));
        addon_names.extend(stack.addons.iter().map(|a| a.name.as_str()));
    }

    let manifest_conflicts = candidate
        .manifests
        .iter()
        .filter(|m| manifest_names.contains(m.name.as_str()))
        .map(|m| m.name.clone())
        .collect();
    let addon_conflicts = candidate
        .addons
        .iter()
        .filter(|a| addon_names.contains(a.name.as_str()))
        .map(|a| a.name.clone())
        .collect();

    (manifest_conflicts, addon_conflicts)
}

/// Relative paths a stack references through `from_file`.
pub fn referenced_files(stack: &StackConfig) -> Vec<String> {
    let mut files = Vec::new();
    for manifest in &stack.manifests {
        if !manifest.from_file.is_empty() {
            files.push(manifest.from_file.clone());
        }
    }
    for addon in &stack.addons {
        if let Some(from_file) = addon.config_from_file() {
            files.push(from_file);
        }
    }
    files
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    SkippedExisting,
    SourceMissing,
}

/// Where the source cluster document and its referenced files live.
#[derive(Debug, Clone)]
pub enum CloneSource {
    File(PathBuf),
    Url(Url),
}

impl CloneSource {
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Self::Url(url),
            _ => Self::File(PathBuf::from(raw)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    pub async fn load_config(&self) -> Result<ImportClusterConfig> {
        let raw = match self {
            Self::File(path) => fs::read_to_string(path).map_err(|e| {
                AnkraError::InvalidResource(format!("cannot read {path:?}: {e}"))
            })?,
            Self::Url(url) => {
                info!(%url, "downloading cluster configuration");
                download_text(url.as_str()).await?
            }
        };
        ImportClusterConfig::parse(&raw)
    }

    /// Copy one referenced file into `dest_dir/rel`, preserving the relative
    /// layout. Remote sources always overwrite; local sources honour
    /// `force`.
    pub async fn copy_asset(
        &self,
        rel: &str,
        dest_dir: &Path,
        only_missing: bool,
        force: bool,
    ) -> Result<CopyOutcome> {
        let dest = dest_dir.join(rel);
        if only_missing && dest.exists() {
            return Ok(CopyOutcome::SkippedExisting);
        }

        match self {
            Self::File(source_path) => {
                let base = source_path.parent().unwrap_or_else(|| Path::new("."));
                let src = base.join(rel);
                if !src.exists() {
                    return Ok(CopyOutcome::SourceMissing);
                }
                if dest.exists() && !force {
                    return Ok(CopyOutcome::SkippedExisting);
                }
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&src, &dest)?;
                Ok(CopyOutcome::Copied)
            }
            Self::Url(url) => {
                let base = asset_base_url(url);
                let full = format!("{base}/{rel}");
                info!(url = %full, "downloading referenced file");
                let resp = reqwest::get(&full).await?;
                if resp.status() == reqwest::StatusCode::NOT_FOUND {
                    return Ok(CopyOutcome::SourceMissing);
                }
                if !resp.status().is_success() {
                    return Err(AnkraError::Api {
                        status: resp.status().as_u16(),
                        body: format!("downloading {full}"),
                    });
                }
                let bytes = resp.bytes().await?;
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&dest, &bytes)?;
                Ok(CopyOutcome::Copied)
            }
        }
    }
}

async fn download_text(url: &str) -> Result<String> {
    let resp = reqwest::get(url).await?;
    if !resp.status().is_success() {
        return Err(AnkraError::Api {
            status: resp.status().as_u16(),
            body: format!("downloading {url}"),
        });
    }
    Ok(resp.text().await?)
}

/// Strip the document filename so relative references resolve against its
/// directory.
fn asset_base_url(url: &Url) -> String {
    let mut base = url.clone();
    {
        let path = base.path();
        let trimmed = match path.rfind('/') {
            Some(idx) => &path[..idx],
            None => path,
        };
        let trimmed = trimmed.to_string();
        base.set_path(&trimmed);
    }
    base.to_string().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cluster::import::{AddonConfig, ManifestConfig};

    fn stack(name: &str, manifests: &[&str], addons: &[&str]) -> StackConfig {
        StackConfig {
            name: name.to_string(),
            manifests: manifests
                .iter()
                .map(|m| ManifestConfig {
                    name: m.to_string(),
                    ..Default::default()
                })
                .collect(),
            addons: addons
                .iter()
                .map(|a| AddonConfig {
                    name: a.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn cluster(name: &str, stacks: Vec<StackConfig>) -> ImportClusterConfig {
        ImportClusterConfig {
            api_version: "v1".into(),
            kind: IMPORT_CLUSTER_KIND.into(),
            metadata: ClusterMetadata {
                name: name.into(),
                description: String::new(),
            },
            spec: ClusterSpec {
                git_repository: None,
                stacks,
            },
        }
    }

    #[test]
    fn test_derive_clone_name() {
        assert_eq!(derive_clone_name("prod-cluster"), "prod-cloned-cluster");
        assert_eq!(derive_clone_name("staging"), "staging-cloned");
    }

    #[test]
    fn test_merge_adds_new_stacks() {
        let source = cluster("src", vec![stack("monitoring", &["alerts"], &["grafana"])]);
        let mut target = cluster("dst", vec![]);

        let report = merge_stacks(&source, &mut target, &CloneOptions::default());

        assert_eq!(report.added(), 1);
        assert_eq!(report.skipped(), 0);
        assert_eq!(target.spec.stacks.len(), 1);
    }

    #[test]
    fn test_merge_skips_stack_name_conflict() {
        let source = cluster("src", vec![stack("monitoring", &[], &[])]);
        let mut target = cluster("dst", vec![stack("monitoring", &[], &[])]);

        let report = merge_stacks(&source, &mut target, &CloneOptions::default());

        assert_eq!(report.skipped(), 1);
        assert_eq!(target.spec.stacks.len(), 1);
        assert!(matches!(
            report.decisions[0].action,
            StackAction::Skipped {
                name_conflict: true,
                ..
            }
        ));
    }

    #[test]
    fn test_merge_detects_cross_stack_addon_conflict() {
        let source = cluster("src", vec![stack("ingress", &[], &["grafana"])]);
        let mut target = cluster("dst", vec![stack("monitoring", &[], &["grafana"])]);

        let report = merge_stacks(&source, &mut target, &CloneOptions::default());

        assert_eq!(report.skipped(), 1);
        match &report.decisions[0].action {
            StackAction::Skipped {
                addon_conflicts, ..
            } => assert_eq!(addon_conflicts, &vec!["grafana".to_string()]),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_force_replaces_conflicting_stack() {
        let source = cluster("src", vec![stack("monitoring", &["new-alerts"], &[])]);
        let mut target = cluster("dst", vec![stack("monitoring", &["old-alerts"], &[])]);

        let options = CloneOptions {
            force: true,
            ..Default::default()
        };
        let report = merge_stacks(&source, &mut target, &options);

        assert_eq!(report.added(), 1);
        assert_eq!(target.spec.stacks.len(), 1);
        assert_eq!(target.spec.stacks[0].manifests[0].name, "new-alerts");
        assert!(matches!(report.decisions[0].action, StackAction::Replaced));
    }

    #[test]
    fn test_clean_drops_existing_stacks_first() {
        let source = cluster("src", vec![stack("ingress", &[], &[])]);
        let mut target = cluster("dst", vec![stack("monitoring", &[], &[])]);

        let options = CloneOptions {
            clean: true,
            ..Default::default()
        };
        merge_stacks(&source, &mut target, &options);

        assert_eq!(target.spec.stacks.len(), 1);
        assert_eq!(target.spec.stacks[0].name, "ingress");
    }

    #[test]
    fn test_conflict_check_sees_stacks_added_this_run() {
        let source = cluster(
            "src",
            vec![
                stack("first", &["shared"], &[]),
                stack("second", &["shared"], &[]),
            ],
        );
        let mut target = cluster("dst", vec![]);

        let report = merge_stacks(&source, &mut target, &CloneOptions::default());

        assert_eq!(report.added(), 1);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn test_referenced_files_includes_addon_configs() {
        let mut s = stack("monitoring", &[], &[]);
        s.manifests.push(ManifestConfig {
            name: "alerts".into(),
            from_file: "manifests/alerts.yaml".into(),
            ..Default::default()
        });
        let mut config = serde_yaml::Mapping::new();
        config.insert("from_file".into(), "values/grafana.yaml".into());
        s.addons.push(AddonConfig {
            name: "grafana".into(),
            configuration: Some(config),
            ..Default::default()
        });

        assert_eq!(
            referenced_files(&s),
            vec![
                "manifests/alerts.yaml".to_string(),
                "values/grafana.yaml".to_string()
            ]
        );
    }

    #[test]
    fn test_source_parse() {
        assert!(CloneSource::parse("https://example.com/cluster.yaml").is_remote());
        assert!(!CloneSource::parse("clusters/prod.yaml").is_remote());
    }

    #[test]
    fn test_asset_base_url_strips_filename() {
        let url = Url::parse("https://example.com/repo/main/cluster.yaml").unwrap();
        assert_eq!(asset_base_url(&url), "https://example.com/repo/main");
    }
}

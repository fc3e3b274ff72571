//! Clone stacks between cluster configuration files

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use super::commands::GlobalArgs;
use crate::domain::cluster::clone::{
    merge_stacks, referenced_files, scaffold_target, CloneOptions, CloneSource, CopyOutcome,
    MergeReport, StackAction,
};
use crate::domain::cluster::ImportClusterConfig;

#[derive(Parser, Debug, Clone)]
pub struct CloneCommand {
    /// Existing cluster YAML: a local path or an http(s) URL
    pub source: String,

    /// Path of the cluster YAML to create or merge into
    pub target: PathBuf,

    /// Replace all stacks in the target with those from the source
    #[arg(long)]
    pub clean: bool,

    /// Merge even when stack, manifest or addon names conflict
    #[arg(long)]
    pub force: bool,

    /// Copy missing referenced files even for skipped stacks
    #[arg(long)]
    pub copy_missing: bool,
}

impl CloneCommand {
    pub async fn execute(&self, _global: &GlobalArgs) -> anyhow::Result<()> {
        let options = CloneOptions {
            clean: self.clean,
            force: self.force,
            copy_missing: self.copy_missing,
        };

        let source = CloneSource::parse(&self.source);
        let source_config = source.load_config().await?;

        let target_exists = self.target.exists();
        let mut target_config = if target_exists {
            ImportClusterConfig::load(&self.target)?
        } else {
            scaffold_target(&source_config)
        };

        let target_dir = self
            .target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let report = merge_stacks(&source_config, &mut target_config, &options);

        for decision in &report.decisions {
            let Some(stack) = source_config
                .spec
                .stacks
                .iter()
                .find(|s| s.name == decision.stack_name)
            else {
                continue;
            };

            match &decision.action {
                StackAction::Added | StackAction::Replaced => {
                    for rel in referenced_files(stack) {
                        let outcome = source
                            .copy_asset(&rel, &target_dir, false, options.force)
                            .await?;
                        report_copy(&rel, outcome, options.force);
                    }
                }
                StackAction::Skipped {
                    name_conflict,
                    manifest_conflicts,
                    addon_conflicts,
                } => {
                    if *name_conflict {
                        println!(
                            "Skipping stack {:?} - name already exists (use --force to override)",
                            decision.stack_name
                        );
                    } else {
                        println!("Skipping stack {:?} due to conflicts:", decision.stack_name);
                        if !manifest_conflicts.is_empty() {
                            println!("  Manifest conflicts: {}", manifest_conflicts.join(", "));
                        }
                        if !addon_conflicts.is_empty() {
                            println!("  Addon conflicts: {}", addon_conflicts.join(", "));
                        }
                    }

                    if options.copy_missing {
                        println!(
                            "Copying missing files from skipped stack {:?}",
                            decision.stack_name
                        );
                        for rel in referenced_files(stack) {
                            let outcome = source
                                .copy_asset(&rel, &target_dir, true, options.force)
                                .await?;
                            report_copy(&rel, outcome, options.force);
                        }
                    }
                }
            }
        }

        target_config.save(&self.target)?;

        println!(
            "Clone completed: {} stacks added, {} stacks skipped",
            report.added(),
            report.skipped()
        );
        self.print_summary(&source_config, &target_config, target_exists, &report);
        Ok(())
    }

    fn print_summary(
        &self,
        source: &ImportClusterConfig,
        target: &ImportClusterConfig,
        target_existed: bool,
        _report: &MergeReport,
    ) {
        let rule = "=".repeat(60);
        println!();
        println!("{rule}");
        println!("{}", "CLONE SUMMARY".bold());
        println!("{rule}");

        println!(
            "Source cluster: {} ({})",
            source.metadata.name, self.source
        );
        println!(
            "Target cluster: {} ({})",
            target.metadata.name,
            self.target.display()
        );
        println!(
            "Target existed: {}",
            if target_existed { "Yes (merged)" } else { "No (created)" }
        );

        let mut flags = Vec::new();
        if self.clean {
            flags.push("--clean");
        }
        if self.force {
            flags.push("--force");
        }
        if self.copy_missing {
            flags.push("--copy-missing");
        }
        println!(
            "Flags used: {}",
            if flags.is_empty() {
                "none".to_string()
            } else {
                flags.join(", ")
            }
        );

        let total_manifests: usize = target.spec.stacks.iter().map(|s| s.manifests.len()).sum();
        let total_addons: usize = target.spec.stacks.iter().map(|s| s.addons.len()).sum();
        println!("Total stacks in result: {}", target.spec.stacks.len());
        println!("Total manifests: {total_manifests}");
        println!("Total addons: {total_addons}");

        println!();
        println!("Stacks in result:");
        for (i, stack) in target.spec.stacks.iter().enumerate() {
            println!(
                "  {}. {} ({} manifests, {} addons)",
                i + 1,
                stack.name,
                stack.manifests.len(),
                stack.addons.len()
            );
        }

        println!();
        println!("Next steps:");
        println!("  1. Review the generated file: {}", self.target.display());
        println!("  2. Apply the cluster: ankra apply -f {}", self.target.display());
        println!("{rule}");
    }
}

fn report_copy(rel: &str, outcome: CopyOutcome, force: bool) {
    match outcome {
        CopyOutcome::Copied => println!("Copied file: {rel}"),
        CopyOutcome::SkippedExisting => {
            if force {
                println!("File {rel:?} already exists, skipping copy");
            } else {
                println!("File {rel:?} already exists, skipping copy (use --force to override)");
            }
        }
        CopyOutcome::SourceMissing => println!("Source file {rel:?} does not exist, skipping"),
    }
}

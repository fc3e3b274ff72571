//! Apply an ImportCluster YAML file

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::Parser;
use colored::Colorize;

use super::commands::GlobalArgs;
use crate::domain::cluster::ImportClusterConfig;

#[derive(Parser, Debug, Clone)]
pub struct ApplyCommand {
    /// Path to the ImportCluster YAML file to apply
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: PathBuf,
}

impl ApplyCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let config = ImportClusterConfig::load(&self.file)?;
        let base_dir = self
            .file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let request = config.to_import_request(base_dir)?;

        let context = global.context()?;
        let client = global.client()?;
        let response = client.import_cluster(&request).await?;

        if !response.errors.is_empty() {
            eprintln!("Import failed with the following issues:");
            for resource_error in &response.errors {
                eprintln!("- {} {:?}:", resource_error.kind, resource_error.name);
                for detail in &resource_error.errors {
                    eprintln!("    • {}: {}", detail.key, detail.message);
                }
            }
            bail!("import rejected by the platform");
        }

        if response.import_command.is_empty() {
            println!("Cluster '{}' has been updated!", response.name);
            println!();
        } else {
            println!("Cluster '{}' imported!", response.name.green());
            println!();
            println!("To install the Ankra agent, run:");
            // The command arrives with embedded newlines and indentation.
            let flattened = response
                .import_command
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            println!("{flattened}");
        }

        println!();
        println!("View it in the UI:");
        println!(
            "  {}/organisation/clusters/cluster/imported/{}/overview",
            context.base_url.trim_end_matches('/'),
            response.cluster_id
        );
        Ok(())
    }
}

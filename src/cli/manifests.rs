//! Manifest commands for the active cluster

use anyhow::bail;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::Parser;
use colored::Colorize;

use super::cluster::resolve_cluster;
use super::commands::GlobalArgs;
use super::display::{extract_kind_from_base64, StateIcon, TableRenderer};

#[derive(Parser, Debug)]
pub struct ManifestsCommand {
    #[command(subcommand)]
    pub command: ManifestsSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum ManifestsSubcommand {
    /// List manifests, or show one manifest with its decoded body
    List(ManifestsListCommand),
}

impl ManifestsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            ManifestsSubcommand::List(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ManifestsListCommand {
    /// Manifest name for a detailed view
    pub name: Option<String>,
}

impl ManifestsListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let manifests = client.list_manifests(&target.id).await?;

        match &self.name {
            None => println!("{}", TableRenderer::new().render_manifests(&manifests)),
            Some(name) => {
                let Some(manifest) = manifests.iter().find(|m| m.name == *name) else {
                    bail!("manifest {:?} not found on cluster {}", name, target.name);
                };

                println!("{}", manifest.name.bold());
                println!(
                    "  Kind: {}",
                    extract_kind_from_base64(&manifest.manifest_base64)
                );
                println!(
                    "  Namespace: {}",
                    manifest.namespace.as_deref().unwrap_or("-")
                );
                println!("  State: {}", StateIcon::with_state(&manifest.state));
                for parent in &manifest.parents {
                    println!("  Parent: {} ({})", parent.name, parent.kind);
                }

                match STANDARD
                    .decode(&manifest.manifest_base64)
                    .ok()
                    .and_then(|bytes| String::from_utf8(bytes).ok())
                {
                    Some(body) => {
                        println!();
                        println!("{body}");
                    }
                    None => println!("  (manifest body could not be decoded)"),
                }
            }
        }
        Ok(())
    }
}

//! Addon commands for the active cluster

use anyhow::bail;
use clap::Parser;
use colored::Colorize;

use super::cluster::resolve_cluster;
use super::commands::GlobalArgs;
use super::display::{format_time_ago, StateIcon, TableRenderer};

#[derive(Parser, Debug)]
pub struct AddonsCommand {
    #[command(subcommand)]
    pub command: AddonsSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum AddonsSubcommand {
    /// List installed addons, or show one addon in detail
    List(AddonsListCommand),

    /// List addons available to install
    Available(AddonsAvailableCommand),

    /// Show the settings of an installed addon
    Settings(AddonsSettingsCommand),

    /// Uninstall an addon
    Uninstall(AddonsUninstallCommand),
}

impl AddonsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            AddonsSubcommand::List(cmd) => cmd.execute(global).await,
            AddonsSubcommand::Available(cmd) => cmd.execute(global).await,
            AddonsSubcommand::Settings(cmd) => cmd.execute(global).await,
            AddonsSubcommand::Uninstall(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddonsListCommand {
    /// Addon name for a detailed view
    pub name: Option<String>,
}

impl AddonsListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let response = client.list_addons(&target.id).await?;

        match &self.name {
            None => println!("{}", TableRenderer::new().render_addons(&response.result)),
            Some(name) => {
                let Some(addon) = response.result.iter().find(|a| a.name == *name) else {
                    bail!("addon {:?} not found on cluster {}", name, target.name);
                };
                println!("{}", addon.name.bold());
                println!("  ID: {}", addon.id);
                println!("  Chart: {} {}", addon.chart_name, addon.chart_version);
                println!("  Repository: {}", addon.repository_url);
                println!(
                    "  Namespace: {}",
                    addon.namespace.as_deref().unwrap_or("-")
                );
                let state = addon
                    .state
                    .as_deref()
                    .or(addon.health.as_deref())
                    .unwrap_or("unknown");
                println!("  State: {}", StateIcon::with_state(state));
                println!(
                    "  Managed: {}",
                    if addon.through_ankra { "through Ankra" } else { "external" }
                );
                println!("  Created: {}", format_time_ago(&addon.created_at));
                println!("  Updated: {}", format_time_ago(&addon.updated_at));
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddonsAvailableCommand {}

impl AddonsAvailableCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let addons = client.list_available_addons(&target.id).await?;
        println!("{}", TableRenderer::new().render_available_addons(&addons));
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddonsSettingsCommand {
    /// Addon name
    pub name: String,
}

impl AddonsSettingsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let settings = client.get_addon_settings(&target.id, &self.name).await?;
        println!("{}", serde_json::to_string_pretty(&settings)?);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddonsUninstallCommand {
    /// Addon name
    pub name: String,

    /// Also uninstall the release from the cluster, not just from management
    #[arg(long)]
    pub delete: bool,
}

impl AddonsUninstallCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;

        // The delete endpoint takes the addon resource id, not its name.
        let response = client.list_addons(&target.id).await?;
        let Some(addon) = response.result.iter().find(|a| a.name == self.name) else {
            bail!("addon {:?} not found on cluster {}", self.name, target.name);
        };

        client
            .delete_addon(&target.id, &addon.id, self.delete)
            .await?;
        println!(
            "Addon {:?} uninstalled from cluster {}.",
            self.name, target.name
        );
        Ok(())
    }
}

//! Cluster commands: listing, selection, reconcile, SOPS and deletion

use anyhow::{anyhow, bail, Context as _};
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use serde::Deserialize;

use super::addons::AddonsCommand;
use super::agent::AgentCommand;
use super::commands::GlobalArgs;
use super::display::TableRenderer;
use super::manifests::ManifestsCommand;
use super::operations::OperationsCommand;
use super::secrets::{DecryptCommand, EncryptCommand};
use super::stacks::StacksCommand;
use crate::domain::config::SelectedCluster;
use crate::shared::error::AnkraError;

#[derive(Parser, Debug)]
pub struct ClusterCommand {
    #[command(subcommand)]
    pub command: ClusterSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum ClusterSubcommand {
    /// List all clusters
    List(ClusterListCommand),

    /// Get details of a specific cluster
    Get(ClusterGetCommand),

    /// Interactively select the active cluster
    Select(ClusterSelectCommand),

    /// Clear the active cluster selection
    Clear(ClusterClearCommand),

    /// Trigger cluster reconciliation
    Reconcile(ClusterReconcileCommand),

    /// Encrypt a secret value using SOPS
    Sops(ClusterSopsCommand),

    /// Encrypt values in manifests or addons
    Encrypt(EncryptCommand),

    /// Decrypt values in manifests
    Decrypt(DecryptCommand),

    /// Manage stacks on the active cluster
    Stacks(StacksCommand),

    /// Manage addons on the active cluster
    Addons(AddonsCommand),

    /// Inspect manifests on the active cluster
    Manifests(ManifestsCommand),

    /// Inspect operations on the active cluster
    Operations(OperationsCommand),

    /// Manage the cluster agent
    Agent(AgentCommand),
}

impl ClusterCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            ClusterSubcommand::List(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Get(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Select(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Clear(cmd) => cmd.execute().await,
            ClusterSubcommand::Reconcile(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Sops(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Encrypt(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Decrypt(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Stacks(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Addons(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Manifests(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Operations(cmd) => cmd.execute(global).await,
            ClusterSubcommand::Agent(cmd) => cmd.execute(global).await,
        }
    }
}

/// Resolve the cluster a subcommand should act on: an explicit name wins,
/// otherwise the persisted selection.
pub async fn resolve_cluster(
    global: &GlobalArgs,
    name: Option<&str>,
) -> anyhow::Result<SelectedCluster> {
    if let Some(name) = name {
        let client = global.client()?;
        let found = client.get_cluster_by_name(name).await?;
        return Ok(SelectedCluster {
            id: found.cluster.id,
            name: found.cluster.name,
        });
    }

    SelectedCluster::load()?.ok_or_else(|| {
        anyhow!("no cluster specified and no cluster selected; run 'ankra cluster select' first")
    })
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterListCommand {
    /// Page to fetch
    #[arg(long, default_value_t = crate::infrastructure::constants::DEFAULT_PAGE)]
    pub page: u32,

    /// Results per page
    #[arg(long, default_value_t = crate::infrastructure::constants::DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

impl ClusterListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let response = client.list_clusters(self.page, self.page_size).await?;
        println!("{}", TableRenderer::new().render_clusters(&response.result));
        if response.pagination.total_pages > 1 {
            println!(
                "Page {} of {} ({} clusters total)",
                response.pagination.page,
                response.pagination.total_pages,
                response.pagination.total_count
            );
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterGetCommand {
    /// Cluster name
    pub name: String,
}

impl ClusterGetCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let found = client.get_cluster_by_name(&self.name).await?;
        let cluster = &found.cluster;

        println!("Cluster Details:");
        println!("  ID: {}", cluster.id);
        println!("  Name: {}", cluster.name);
        println!("  Environment: {}", cluster.environment);
        println!("  Distribution: {}", cluster.kube_distribution);
        println!("  Kube Version: {}", cluster.kube_version);
        println!("  Nodes: {}", cluster.nodes);
        println!("  Control Planes: {}", cluster.control_planes);
        println!("  State: {}", cluster.state);
        println!(
            "  Status: {}",
            found.status.as_deref().unwrap_or("unknown")
        );
        if !cluster.description.is_empty() {
            println!("  Description: {}", cluster.description);
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterSelectCommand {}

impl ClusterSelectCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let response = client
            .list_clusters(1, crate::infrastructure::constants::DEFAULT_PAGE_SIZE)
            .await?;
        if response.result.is_empty() {
            println!("No clusters available.");
            return Ok(());
        }

        let labels: Vec<String> = response
            .result
            .iter()
            .map(|c| format!("{} ({})", c.name, c.id))
            .collect();
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select cluster")
            .items(&labels)
            .default(0)
            .interact()
            .context("cluster selection prompt")?;

        let chosen = &response.result[index];
        let selection = SelectedCluster {
            id: chosen.id.clone(),
            name: chosen.name.clone(),
        };
        selection.save()?;

        println!(
            "Selected cluster: {} (ID: {}) is now active.",
            chosen.name, chosen.id
        );
        println!("You can now run 'ankra cluster operations list' or 'ankra cluster addons list'.");
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterClearCommand {}

impl ClusterClearCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        SelectedCluster::clear()?;
        println!("Active cluster selection cleared.");
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterReconcileCommand {
    /// Cluster name (defaults to the active cluster)
    pub name: Option<String>,
}

impl ClusterReconcileCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, self.name.as_deref()).await?;
        let client = global.client()?;

        println!("Triggering reconciliation for cluster {}...", target.name);
        let response = client.reconcile_cluster(&target.id).await?;
        if response.success {
            println!("{}", "✓ Reconciliation triggered".green());
        }
        if !response.message.is_empty() {
            println!("{}", response.message);
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterSopsCommand {
    /// Secret value to encrypt
    pub secret: String,
}

#[derive(Debug, Deserialize)]
struct EncryptedScalar {
    value: String,
}

impl ClusterSopsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        if SelectedCluster::load()?.is_none() {
            bail!("no active cluster selected; run 'ankra cluster select' to pick one");
        }

        let client = global.client()?;
        let yaml_content = format!("value: {:?}\n", self.secret);
        let response = client
            .sops_encrypt(&yaml_content, &["value".to_string()])
            .await?;
        if !response.success {
            bail!("encryption failed");
        }

        let parsed: EncryptedScalar =
            serde_yaml::from_str(&response.encrypted_yaml).context("parse encrypted yaml")?;
        println!("{}", parsed.value);
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct DeleteCommand {
    #[command(subcommand)]
    pub command: DeleteSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum DeleteSubcommand {
    /// Delete a cluster by name
    Cluster(DeleteClusterCommand),
}

impl DeleteCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            DeleteSubcommand::Cluster(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteClusterCommand {
    /// Cluster name
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

impl DeleteClusterCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        if !self.force {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!(
                    "Are you sure you want to delete cluster {:?}? This action is irreversible!",
                    self.name
                ))
                .default(false)
                .interact()
                .context("delete confirmation prompt")?;
            if !confirmed {
                println!("Aborted.");
                return Ok(());
            }
        }

        let client = global.client()?;
        match client.delete_cluster(&self.name).await {
            Ok(()) => {
                println!("Cluster {:?} deleted successfully.", self.name);
                Ok(())
            }
            // 404/422 mean the name never existed or was already removed.
            Err(e @ AnkraError::Api { .. }) if e.is_status(404) || e.is_status(422) => {
                println!(
                    "Cluster {} does not exist, either the name is wrong or it's already been deleted.",
                    self.name
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

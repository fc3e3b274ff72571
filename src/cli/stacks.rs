//! Stack commands for the active cluster

use anyhow::bail;
use clap::Parser;
use colored::Colorize;

use super::cluster::resolve_cluster;
use super::commands::GlobalArgs;
use super::display::{extract_kind_from_base64, StateIcon, TableRenderer};
use crate::infrastructure::api::stacks::Stack;

#[derive(Parser, Debug)]
pub struct StacksCommand {
    #[command(subcommand)]
    pub command: StacksSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum StacksSubcommand {
    /// List stacks, or show one stack in detail
    List(StacksListCommand),

    /// Create an empty stack
    Create(StacksCreateCommand),

    /// Delete a stack
    Delete(StacksDeleteCommand),

    /// Rename a stack
    Rename(StacksRenameCommand),

    /// Show the change history of a stack
    History(StacksHistoryCommand),
}

impl StacksCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            StacksSubcommand::List(cmd) => cmd.execute(global).await,
            StacksSubcommand::Create(cmd) => cmd.execute(global).await,
            StacksSubcommand::Delete(cmd) => cmd.execute(global).await,
            StacksSubcommand::Rename(cmd) => cmd.execute(global).await,
            StacksSubcommand::History(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StacksListCommand {
    /// Stack name for a detailed view
    pub name: Option<String>,
}

impl StacksListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let stacks = client.list_stacks(&target.id).await?;

        match &self.name {
            None => println!("{}", TableRenderer::new().render_stacks(&stacks)),
            Some(name) => {
                let Some(stack) = stacks.iter().find(|s| s.name == *name) else {
                    bail!("stack {:?} not found on cluster {}", name, target.name);
                };
                print_stack_detail(stack);
            }
        }
        Ok(())
    }
}

fn print_stack_detail(stack: &Stack) {
    println!("{}", stack.name.bold());
    if !stack.description.is_empty() {
        println!("  {}", stack.description);
    }
    println!("  State: {}", StateIcon::with_state(&stack.state));

    if !stack.manifests.is_empty() {
        println!();
        println!("  Manifests:");
        for manifest in &stack.manifests {
            let kind = extract_kind_from_base64(&manifest.manifest_base64);
            println!(
                "    {} {} ({})",
                StateIcon::for_state(&manifest.state),
                manifest.name,
                kind
            );
            if let Some(namespace) = &manifest.namespace {
                println!("      namespace: {namespace}");
            }
            for parent in &manifest.parents {
                println!("      parent: {} ({})", parent.name, parent.kind);
            }
        }
    }

    if !stack.addons.is_empty() {
        println!();
        println!("  Addons:");
        for addon in &stack.addons {
            println!(
                "    {} {} ({} {})",
                StateIcon::for_state(&addon.state),
                addon.name,
                addon.chart_name,
                addon.chart_version
            );
            if let Some(namespace) = &addon.namespace {
                println!("      namespace: {namespace}");
            }
            for parent in &addon.parents {
                println!("      parent: {} ({})", parent.name, parent.kind);
            }
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StacksCreateCommand {
    /// Stack name
    pub name: String,

    /// Stack description
    #[arg(long, default_value = "")]
    pub description: String,
}

impl StacksCreateCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        client
            .create_stack(&target.id, &self.name, &self.description)
            .await?;
        println!("Stack {:?} created on cluster {}.", self.name, target.name);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StacksDeleteCommand {
    /// Stack name
    pub name: String,
}

impl StacksDeleteCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        client.delete_stack(&target.id, &self.name).await?;
        println!("Stack {:?} deleted from cluster {}.", self.name, target.name);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StacksRenameCommand {
    /// Current stack name
    pub name: String,

    /// New stack name
    pub new_name: String,
}

impl StacksRenameCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        client
            .rename_stack(&target.id, &self.name, &self.new_name)
            .await?;
        println!("Stack {:?} renamed to {:?}.", self.name, self.new_name);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StacksHistoryCommand {
    /// Stack name
    pub name: String,
}

impl StacksHistoryCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let response = client.stack_history(&target.id, &self.name).await?;
        println!("History for stack {:?}:", response.stack_name);
        println!(
            "{}",
            TableRenderer::new().render_stack_history(&response.history)
        );
        Ok(())
    }
}

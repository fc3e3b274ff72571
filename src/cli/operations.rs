//! Operation and job commands for the active cluster

use anyhow::bail;
use clap::Parser;
use colored::Colorize;

use super::cluster::resolve_cluster;
use super::commands::GlobalArgs;
use super::display::{format_time_ago, StateIcon, TableRenderer};

#[derive(Parser, Debug)]
pub struct OperationsCommand {
    #[command(subcommand)]
    pub command: OperationsSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum OperationsSubcommand {
    /// List write operations, or show one operation in detail
    List(OperationsListCommand),

    /// Show the jobs of an operation
    Jobs(OperationsJobsCommand),

    /// Cancel a running operation
    Cancel(OperationsCancelCommand),

    /// Cancel a single job within an operation
    CancelJob(OperationsCancelJobCommand),
}

impl OperationsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            OperationsSubcommand::List(cmd) => cmd.execute(global).await,
            OperationsSubcommand::Jobs(cmd) => cmd.execute(global).await,
            OperationsSubcommand::Cancel(cmd) => cmd.execute(global).await,
            OperationsSubcommand::CancelJob(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OperationsListCommand {
    /// Operation id for a detailed view
    pub id: Option<String>,
}

impl OperationsListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let operations = client.list_operations(&target.id).await?;

        match &self.id {
            None => println!("{}", TableRenderer::new().render_operations(&operations)),
            Some(id) => {
                let Some(op) = operations.iter().find(|o| o.id == *id) else {
                    bail!("operation {:?} not found on cluster {}", id, target.name);
                };
                println!("{}", op.name.bold());
                println!("  ID: {}", op.id);
                println!("  Status: {}", StateIcon::with_state(&op.status));
                println!("  Started: {}", format_time_ago(&op.created_at));
                println!("  Updated: {}", format_time_ago(&op.updated_at));
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OperationsJobsCommand {
    /// Operation id
    pub operation_id: String,
}

impl OperationsJobsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let response = client
            .operation_jobs(&target.id, &self.operation_id)
            .await?;

        if let Some(info) = &response.operation_information {
            println!(
                "Operation: {} ({})",
                info.name.bold(),
                StateIcon::with_state(&info.status)
            );
            println!();
        }

        println!("{}", TableRenderer::new().render_jobs(&response.jobs));

        let failed: Vec<_> = response
            .detailed_job_information
            .iter()
            .filter_map(|d| d.message.as_deref().map(|m| (d.name.as_str(), m)))
            .collect();
        if !failed.is_empty() {
            println!();
            for (name, message) in failed {
                println!("  {name}: {message}");
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OperationsCancelCommand {
    /// Operation id
    pub operation_id: String,
}

impl OperationsCancelCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        client.cancel_operation(&self.operation_id).await?;
        println!("Operation {} cancelled.", self.operation_id);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OperationsCancelJobCommand {
    /// Operation id
    pub operation_id: String,

    /// Job id
    pub job_id: String,
}

impl OperationsCancelJobCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        client
            .cancel_job(&self.operation_id, &self.job_id)
            .await?;
        println!(
            "Job {} of operation {} cancelled.",
            self.job_id, self.operation_id
        );
        Ok(())
    }
}

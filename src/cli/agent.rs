//! Cluster agent commands

use clap::Parser;
use colored::Colorize;

use super::cluster::resolve_cluster;
use super::commands::GlobalArgs;
use super::display::{format_time_ago, format_timestamp, StateIcon};

#[derive(Parser, Debug)]
pub struct AgentCommand {
    #[command(subcommand)]
    pub command: AgentSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum AgentSubcommand {
    /// Show agent health and version
    Status(AgentStatusCommand),

    /// Show or rotate the agent token
    Token(AgentTokenCommand),

    /// Upgrade the agent to the latest version
    Upgrade(AgentUpgradeCommand),
}

impl AgentCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            AgentSubcommand::Status(cmd) => cmd.execute(global).await,
            AgentSubcommand::Token(cmd) => cmd.execute(global).await,
            AgentSubcommand::Upgrade(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AgentStatusCommand {}

impl AgentStatusCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let agent = client.get_agent(&target.id).await?;

        println!("Agent on cluster {}:", target.name.bold());
        println!("  Status: {}", StateIcon::with_state(&agent.status));
        println!(
            "  Healthy: {}",
            if agent.healthy {
                "yes".green().to_string()
            } else {
                "no".red().to_string()
            }
        );
        println!("  Version: {}", agent.version);
        if let Some(last_seen) = &agent.last_seen {
            println!("  Last seen: {}", format_time_ago(last_seen));
        }
        if let Some(connected_at) = &agent.connected_at {
            println!("  Connected: {}", format_time_ago(connected_at));
        }
        if agent.upgrade_available {
            let latest = agent.latest_version.as_deref().unwrap_or("a newer version");
            println!();
            println!(
                "  {} {latest} is available; run 'ankra cluster agent upgrade'",
                "Upgrade:".yellow()
            );
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AgentTokenCommand {
    /// Mint a fresh token instead of fetching the current one
    #[arg(long)]
    pub generate: bool,
}

impl AgentTokenCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        let token = if self.generate {
            client.rotate_agent_token(&target.id).await?
        } else {
            client.get_agent_token(&target.id).await?
        };

        println!("{}", token.token);
        if !token.expires_at.is_empty() {
            println!("Expires: {}", format_timestamp(&token.expires_at));
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AgentUpgradeCommand {}

impl AgentUpgradeCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let target = resolve_cluster(global, None).await?;
        let client = global.client()?;
        client.upgrade_agent(&target.id).await?;
        println!("Agent upgrade triggered for cluster {}.", target.name);
        Ok(())
    }
}

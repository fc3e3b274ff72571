//! API token management

use clap::Parser;
use colored::Colorize;

use super::commands::GlobalArgs;
use super::display::{format_timestamp, TableRenderer};

#[derive(Parser, Debug)]
pub struct TokensCommand {
    #[command(subcommand)]
    pub command: TokensSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum TokensSubcommand {
    /// List your API tokens
    List(TokensListCommand),

    /// Create a new API token
    Create(TokensCreateCommand),

    /// Revoke a token without deleting its record
    Revoke(TokensRevokeCommand),

    /// Delete a token
    Delete(TokensDeleteCommand),
}

impl TokensCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            TokensSubcommand::List(cmd) => cmd.execute(global).await,
            TokensSubcommand::Create(cmd) => cmd.execute(global).await,
            TokensSubcommand::Revoke(cmd) => cmd.execute(global).await,
            TokensSubcommand::Delete(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TokensListCommand {}

impl TokensListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let tokens = client.list_tokens().await?;
        println!("{}", TableRenderer::new().render_tokens(&tokens));
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TokensCreateCommand {
    /// Token name
    pub name: String,

    /// Expiry as an RFC 3339 timestamp
    #[arg(long)]
    pub expires: Option<String>,
}

impl TokensCreateCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let created = client
            .create_token(&self.name, self.expires.as_deref())
            .await?;

        println!("Token {} created ({}).", self.name.green(), created.id);
        if !created.expires_at.is_empty() {
            println!("Expires: {}", format_timestamp(&created.expires_at));
        }
        println!();
        println!("{}", created.token);
        println!();
        println!(
            "{}",
            "Store this value now; it will not be shown again.".yellow()
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TokensRevokeCommand {
    /// Token id
    pub id: String,
}

impl TokensRevokeCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        client.revoke_token(&self.id).await?;
        println!("Token {} revoked.", self.id);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TokensDeleteCommand {
    /// Token id
    pub id: String,
}

impl TokensDeleteCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        client.delete_token(&self.id).await?;
        println!("Token {} deleted.", self.id);
        Ok(())
    }
}

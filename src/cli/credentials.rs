//! Stored provider credentials

use anyhow::bail;
use clap::Parser;
use colored::Colorize;

use super::commands::GlobalArgs;
use super::display::{format_time_ago, TableRenderer};
use crate::domain::config::SelectedOrganisation;

#[derive(Parser, Debug)]
pub struct CredentialsCommand {
    #[command(subcommand)]
    pub command: CredentialsSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum CredentialsSubcommand {
    /// List stored credentials
    List(CredentialsListCommand),

    /// Show a single credential
    Get(CredentialsGetCommand),

    /// Validate a credential against its provider
    Validate(CredentialsValidateCommand),

    /// Delete a credential
    Delete(CredentialsDeleteCommand),
}

impl CredentialsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            CredentialsSubcommand::List(cmd) => cmd.execute(global).await,
            CredentialsSubcommand::Get(cmd) => cmd.execute(global).await,
            CredentialsSubcommand::Validate(cmd) => cmd.execute(global).await,
            CredentialsSubcommand::Delete(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialsListCommand {
    /// Filter by provider, e.g. aws or gcp
    #[arg(long)]
    pub provider: Option<String>,
}

impl CredentialsListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let credentials = client.list_credentials(self.provider.as_deref()).await?;
        println!("{}", TableRenderer::new().render_credentials(&credentials));
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialsGetCommand {
    /// Credential id
    pub id: String,
}

impl CredentialsGetCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let credential = client.get_credential(&self.id).await?;

        println!("{}", credential.name.bold());
        println!("  ID: {}", credential.id);
        println!("  Provider: {}", credential.provider);
        println!("  Created: {}", format_time_ago(&credential.created_at));
        if let Some(updated_at) = &credential.updated_at {
            println!("  Updated: {}", format_time_ago(updated_at));
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialsValidateCommand {
    /// Credential name
    pub name: String,
}

impl CredentialsValidateCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let validation = client.validate_credential(&self.name).await?;

        if validation.valid {
            println!("{} Credential {:?} is valid.", "✓".green(), self.name);
        } else {
            let reason = validation.message.as_deref().unwrap_or("no details given");
            println!("{} Credential {:?} is invalid: {reason}", "✗".red(), self.name);
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialsDeleteCommand {
    /// Credential id
    pub id: String,
}

impl CredentialsDeleteCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        // Deletion is scoped to an organisation on the platform side.
        let organisation_id = match SelectedOrganisation::load()? {
            Some(selected) => selected.organisation_id,
            None => {
                let client = global.client()?;
                match client
                    .list_organisations()
                    .await?
                    .into_iter()
                    .find(|o| o.user_current)
                {
                    Some(current) => current.organisation_id,
                    None => bail!("no active organisation; run 'ankra org switch <id>'"),
                }
            }
        };

        let client = global.client()?;
        client.delete_credential(&self.id, &organisation_id).await?;
        println!("Credential {} deleted.", self.id);
        Ok(())
    }
}

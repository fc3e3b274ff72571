//! Organisation membership and switching

use anyhow::bail;
use clap::Parser;
use colored::Colorize;

use super::commands::GlobalArgs;
use super::display::TableRenderer;
use crate::domain::config::SelectedOrganisation;

#[derive(Parser, Debug)]
pub struct OrgCommand {
    #[command(subcommand)]
    pub command: OrgSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum OrgSubcommand {
    /// List organisations you belong to
    List(OrgListCommand),

    /// Switch the active organisation
    Switch(OrgSwitchCommand),

    /// Show the active organisation
    Current(OrgCurrentCommand),

    /// Create a new organisation
    Create(OrgCreateCommand),

    /// List members of an organisation
    Members(OrgMembersCommand),
}

impl OrgCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            OrgSubcommand::List(cmd) => cmd.execute(global).await,
            OrgSubcommand::Switch(cmd) => cmd.execute(global).await,
            OrgSubcommand::Current(cmd) => cmd.execute(global).await,
            OrgSubcommand::Create(cmd) => cmd.execute(global).await,
            OrgSubcommand::Members(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OrgListCommand {}

impl OrgListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let organisations = client.list_organisations().await?;
        println!(
            "{}",
            TableRenderer::new().render_organisations(&organisations)
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OrgSwitchCommand {
    /// Organisation id to switch to
    pub id: String,
}

impl OrgSwitchCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        client.switch_organisation(&self.id).await?;

        // Remember the choice locally so later commands can use it offline.
        let name = client
            .list_organisations()
            .await
            .ok()
            .and_then(|orgs| {
                orgs.into_iter()
                    .find(|o| o.organisation_id == self.id)
                    .and_then(|o| o.name)
            });
        SelectedOrganisation {
            organisation_id: self.id.clone(),
            name: name.clone(),
        }
        .save()?;

        match name {
            Some(name) => println!("Switched to organisation {}.", name.green()),
            None => println!("Switched to organisation {}.", self.id),
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OrgCurrentCommand {}

impl OrgCurrentCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let organisations = client.list_organisations().await?;

        if let Some(current) = organisations.iter().find(|o| o.user_current) {
            println!(
                "{} ({})",
                current.name.as_deref().unwrap_or("-").bold(),
                current.organisation_id
            );
            if let Some(role) = &current.role {
                println!("  Role: {role}");
            }
            return Ok(());
        }

        // The platform did not mark one; fall back to the local selection.
        if let Some(selected) = SelectedOrganisation::load()? {
            println!(
                "{} ({})",
                selected.name.as_deref().unwrap_or("-").bold(),
                selected.organisation_id
            );
            return Ok(());
        }

        bail!("no active organisation; run 'ankra org switch <id>'");
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OrgCreateCommand {
    /// Organisation name
    pub name: String,

    /// Country the organisation is registered in
    #[arg(long)]
    pub country: Option<String>,
}

impl OrgCreateCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let response = client
            .create_organisation(&self.name, self.country.as_deref())
            .await?;
        println!(
            "Organisation {} created ({}).",
            self.name.green(),
            response.organisation_id
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OrgMembersCommand {
    /// Organisation id; defaults to the active organisation
    pub id: Option<String>,
}

impl OrgMembersCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let id = match &self.id {
            Some(id) => id.clone(),
            None => {
                let organisations = client.list_organisations().await?;
                match organisations.into_iter().find(|o| o.user_current) {
                    Some(current) => current.organisation_id,
                    None => match SelectedOrganisation::load()? {
                        Some(selected) => selected.organisation_id,
                        None => bail!("no active organisation; pass an organisation id"),
                    },
                }
            }
        };

        let details = client.get_organisation(&id).await?;
        if let Some(name) = &details.name {
            println!("Members of {}:", name.bold());
        }
        println!("{}", TableRenderer::new().render_members(&details.members));
        Ok(())
    }
}

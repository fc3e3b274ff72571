//! Browse the Helm chart catalogue

use anyhow::bail;
use clap::Parser;
use colored::Colorize;

use super::commands::GlobalArgs;
use super::display::{format_time_ago, TableRenderer};
use crate::infrastructure::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

#[derive(Parser, Debug)]
pub struct ChartsCommand {
    #[command(subcommand)]
    pub command: ChartsSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum ChartsSubcommand {
    /// List charts available to the organisation
    List(ChartsListCommand),

    /// Search charts by name or description
    Search(ChartsSearchCommand),

    /// Show versions and profiles of a chart
    Info(ChartsInfoCommand),
}

impl ChartsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            ChartsSubcommand::List(cmd) => cmd.execute(global).await,
            ChartsSubcommand::Search(cmd) => cmd.execute(global).await,
            ChartsSubcommand::Info(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ChartsListCommand {
    /// Page number
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    pub page: u32,

    /// Charts per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Only charts from subscribed repositories
    #[arg(long)]
    pub subscribed: bool,
}

impl ChartsListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let response = client
            .list_charts(self.page, self.page_size, self.subscribed)
            .await?;

        println!("{}", TableRenderer::new().render_charts(&response.charts));
        if response.pagination.total_pages > 1 {
            println!(
                "Page {} of {}",
                response.pagination.page, response.pagination.total_pages
            );
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ChartsSearchCommand {
    /// Search term, matched against chart name and description
    pub query: String,
}

impl ChartsSearchCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;
        let response = client.list_charts(1, 100, false).await?;

        let needle = self.query.to_lowercase();
        let matches: Vec<_> = response
            .charts
            .into_iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .collect();

        if matches.is_empty() {
            println!("No charts matching {:?}", self.query);
            return Ok(());
        }
        println!("{}", TableRenderer::new().render_charts(&matches));
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ChartsInfoCommand {
    /// Chart name
    pub chart: String,

    /// Repository URL the chart lives in
    #[arg(long)]
    pub repository: Option<String>,
}

impl ChartsInfoCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let client = global.client()?;

        // Without an explicit repository, resolve it from the catalogue.
        let repository_url = match &self.repository {
            Some(url) => url.clone(),
            None => {
                let response = client.list_charts(1, 100, false).await?;
                let Some(chart) = response.charts.iter().find(|c| c.name == self.chart) else {
                    bail!(
                        "chart {:?} not found; pass --repository to look it up directly",
                        self.chart
                    );
                };
                chart.repository_url.clone()
            }
        };

        let details = client.chart_details(&self.chart, &repository_url).await?;

        println!("{}", details.name.bold());
        if !details.repository_name.is_empty() {
            println!("  Repository: {}", details.repository_name);
        }
        if !details.repository_url.is_empty() {
            println!("  URL: {}", details.repository_url);
        }

        println!();
        if details.versions.is_empty() {
            println!("No versions published");
        } else {
            println!("Versions (latest first):");
            for version in details.versions.iter().take(10) {
                println!("  {version}");
            }
            if details.versions.len() > 10 {
                println!("  ... and {} more", details.versions.len() - 10);
            }
        }

        if !details.profiles.is_empty() {
            println!();
            println!("Profiles:");
            for profile in &details.profiles {
                let description = profile.description.as_deref().unwrap_or("");
                println!(
                    "  {} ({}) {}",
                    profile.name,
                    format_time_ago(&profile.updated_at),
                    description
                );
            }
        }
        Ok(())
    }
}

// CLI command definitions

use std::path::PathBuf;

use clap::Parser;

use super::apply::ApplyCommand;
use super::charts::ChartsCommand;
use super::chat::ChatCommand;
use super::clone::CloneCommand;
use super::cluster::{ClusterCommand, DeleteCommand};
use super::credentials::CredentialsCommand;
use super::login::{LoginCommand, LogoutCommand};
use super::org::OrgCommand;
use super::tokens::TokensCommand;
use crate::domain::config::Context;
use crate::infrastructure::api::ApiClient;
use crate::shared::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "ankra",
    version,
    about = "Command line client for the Ankra platform",
    long_about = "Manage Ankra-imported Kubernetes clusters, stacks, addons and manifests from the terminal"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// API token (falls back to ANKRA_API_TOKEN, then ~/.ankra.yaml)
    #[arg(long, global = true, env = "ANKRA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Platform base URL (falls back to ANKRA_BASE_URL, then ~/.ankra.yaml)
    #[arg(long, global = true, env = "ANKRA_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to the config file (default: ~/.ankra.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn context(&self) -> Result<Context> {
        Context::resolve(
            self.token.as_deref(),
            self.base_url.as_deref(),
            self.config.as_deref(),
        )
    }

    /// Base URL without requiring a token, for login and logout.
    pub fn base_url(&self) -> String {
        Context::resolve_base_url(self.base_url.as_deref(), self.config.as_deref())
    }

    pub fn client(&self) -> Result<ApiClient> {
        let context = self.context()?;
        ApiClient::new(&context.base_url, &context.token)
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with the Ankra platform through your browser
    Login(LoginCommand),

    /// Remove saved credentials
    Logout(LogoutCommand),

    /// Inspect and manage clusters and their resources
    Cluster(ClusterCommand),

    /// Delete resources
    Delete(DeleteCommand),

    /// Apply an ImportCluster YAML file
    Apply(ApplyCommand),

    /// Clone stacks from an existing cluster file or URL
    Clone(CloneCommand),

    /// Browse the Helm chart catalogue
    Charts(ChartsCommand),

    /// Manage organisations
    Org(OrgCommand),

    /// Manage API tokens
    Tokens(TokensCommand),

    /// Manage provider credentials
    Credentials(CredentialsCommand),

    /// Chat with the Ankra assistant
    Chat(ChatCommand),
}

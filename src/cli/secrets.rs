//! SOPS encryption of manifest and addon values files

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use clap::Parser;
use colored::Colorize;

use super::commands::GlobalArgs;
use crate::domain::cluster::ImportClusterConfig;

#[derive(Parser, Debug)]
pub struct EncryptCommand {
    #[command(subcommand)]
    pub command: EncryptSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum EncryptSubcommand {
    /// Encrypt a key in a manifest file
    Manifest(EncryptManifestCommand),

    /// Encrypt a key in an addon configuration file
    Addon(EncryptAddonCommand),
}

impl EncryptCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            EncryptSubcommand::Manifest(cmd) => cmd.execute(global).await,
            EncryptSubcommand::Addon(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct EncryptManifestCommand {
    /// Manifest name as it appears in the cluster YAML
    pub name: String,

    /// Key to encrypt
    #[arg(long)]
    pub key: String,

    /// Path to the cluster YAML file
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: PathBuf,
}

impl EncryptManifestCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let mut cluster = ImportClusterConfig::load(&self.file)?;
        let base_dir = base_dir(&self.file);

        let manifest = cluster
            .find_manifest_mut(&self.name)
            .ok_or_else(|| anyhow!("manifest {:?} not found in any stack", self.name))?;
        if manifest.from_file.is_empty() {
            bail!("manifest {:?} does not have a from_file reference", self.name);
        }

        let file_path = base_dir.join(&manifest.from_file);
        let content = std::fs::read_to_string(&file_path)?;

        println!("Encrypting key {:?} in manifest {:?}...", self.key, self.name);

        let client = global.client()?;
        let response = client
            .sops_encrypt(&content, &[self.key.clone()])
            .await?;
        if !response.success {
            bail!("encryption failed");
        }

        std::fs::write(&file_path, response.encrypted_yaml)?;
        println!("Updated manifest file: {}", file_path.display());

        if manifest.encrypted_paths.iter().any(|k| k == &self.key) {
            println!(
                "Key {:?} already in encrypted_paths, cluster file unchanged",
                self.key
            );
        } else {
            manifest.encrypted_paths.push(self.key.clone());
            cluster.save(&self.file)?;
            println!(
                "Updated cluster file with encrypted_paths: {}",
                self.file.display()
            );
        }

        println!("{}", "Encryption complete!".green());
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct EncryptAddonCommand {
    /// Addon name
    #[arg(long)]
    pub name: String,

    /// Key to encrypt
    #[arg(long)]
    pub key: String,

    /// Path to the cluster YAML file
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: PathBuf,
}

impl EncryptAddonCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let mut cluster = ImportClusterConfig::load(&self.file)?;
        let base_dir = base_dir(&self.file);

        let addon = cluster
            .find_addon_mut(&self.name)
            .ok_or_else(|| anyhow!("addon {:?} not found in any stack", self.name))?;
        let from_file = addon
            .config_from_file()
            .ok_or_else(|| {
                anyhow!(
                    "addon {:?} does not have a from_file configuration reference",
                    self.name
                )
            })?;

        let file_path = base_dir.join(&from_file);
        let content = std::fs::read_to_string(&file_path)?;

        println!("Encrypting key {:?} in addon {:?}...", self.key, self.name);

        let client = global.client()?;
        let response = client
            .sops_encrypt(&content, &[self.key.clone()])
            .await?;
        if !response.success {
            bail!("encryption failed");
        }

        std::fs::write(&file_path, response.encrypted_yaml)?;
        println!("Updated addon configuration file: {}", file_path.display());

        if addon.encrypted_paths().iter().any(|k| k == &self.key) {
            println!(
                "Key {:?} already in encrypted_paths, cluster file unchanged",
                self.key
            );
        } else {
            addon.add_encrypted_path(&self.key);
            cluster.save(&self.file)?;
            println!(
                "Updated cluster file with encrypted_paths: {}",
                self.file.display()
            );
        }

        println!("{}", "Encryption complete!".green());
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct DecryptCommand {
    #[command(subcommand)]
    pub command: DecryptSubcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum DecryptSubcommand {
    /// Decrypt and print a manifest file
    Manifest(DecryptManifestCommand),
}

impl DecryptCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match &self.command {
            DecryptSubcommand::Manifest(cmd) => cmd.execute(global).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct DecryptManifestCommand {
    /// Manifest name as it appears in the cluster YAML
    pub name: String,

    /// Path to the cluster YAML file
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: PathBuf,
}

impl DecryptManifestCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let mut cluster = ImportClusterConfig::load(&self.file)?;
        let base_dir = base_dir(&self.file);

        let manifest = cluster
            .find_manifest_mut(&self.name)
            .ok_or_else(|| anyhow!("manifest {:?} not found in any stack", self.name))?;
        if manifest.from_file.is_empty() {
            bail!("manifest {:?} does not have a from_file reference", self.name);
        }

        let file_path = base_dir.join(&manifest.from_file);
        let content = std::fs::read_to_string(&file_path)?;

        let client = global.client()?;
        let response = client.sops_decrypt(&content).await?;
        if !response.success {
            bail!("decryption failed");
        }

        print!("{}", response.decrypted_yaml);
        Ok(())
    }
}

fn base_dir(file: &Path) -> PathBuf {
    file.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

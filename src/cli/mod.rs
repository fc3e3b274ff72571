//! CLI command definitions and terminal output

pub mod addons;
pub mod agent;
pub mod apply;
pub mod charts;
pub mod chat;
pub mod clone;
pub mod cluster;
pub mod commands;
pub mod credentials;
pub mod display;
pub mod login;
pub mod manifests;
pub mod operations;
pub mod org;
pub mod secrets;
pub mod stacks;
pub mod tokens;

pub use commands::{CliArgs, GlobalArgs};

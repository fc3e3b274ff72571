//! Browser-based login and credential management

use anyhow::{anyhow, bail, Context as _};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use clap::Parser;
use colored::Colorize;
use rand::RngCore;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::warn;

use super::commands::GlobalArgs;
use super::display::format_date;
use crate::domain::config::CliConfig;
use crate::infrastructure::api::auth;
use crate::infrastructure::constants::{LOGIN_TIMEOUT_SECS, MACHINE_ID_PART_MAX};

#[derive(Parser, Debug, Clone)]
pub struct LoginCommand {}

#[derive(Parser, Debug, Clone)]
pub struct LogoutCommand {}

impl LoginCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        println!("Ankra CLI Login");
        println!("───────────────");
        println!();

        let base_url = global.base_url();
        let config_path = config_path(global)?;

        let code_verifier = generate_code_verifier();
        let code_challenge = generate_code_challenge(&code_verifier);

        // Ephemeral loopback listener for the OAuth callback.
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("start callback server")?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://localhost:{port}/callback");

        let init = auth::login_init(&base_url, &redirect_uri, &code_challenge)
            .await
            .context("initialize login")?;

        if !init.auth0_domain.is_empty() {
            println!("Using Auth0 domain: {}", init.auth0_domain);
            println!();
        }

        println!("Opening browser for authentication...");
        println!();
        println!("If the browser doesn't open, visit this URL:");
        println!();
        println!("  {}", init.auth_url);
        println!();

        if webbrowser::open(&init.auth_url).is_err() {
            println!("Could not open browser automatically. Please open the URL above manually.");
        }

        println!();
        println!("Waiting for authentication...");
        println!("(Press Ctrl+C to cancel)");
        println!();

        let code = tokio::time::timeout(
            Duration::from_secs(LOGIN_TIMEOUT_SECS),
            wait_for_callback(listener, &init.state),
        )
        .await
        .map_err(|_| anyhow!("login timed out after {} minutes", LOGIN_TIMEOUT_SECS / 60))??;

        println!("Exchanging authorization code for token...");

        let machine_id = get_or_create_machine_id(&config_path)?;
        let token = auth::exchange_token(&base_url, &code, &init.state, &code_verifier, &machine_id)
            .await
            .context("token exchange")?;

        let mut config = CliConfig::load(&config_path).unwrap_or_default();
        config.token = Some(token.token);
        config.base_url = Some(base_url);
        if !token.token_id.is_empty() {
            config.token_id = Some(token.token_id);
        }
        if !token.token_name.is_empty() {
            config.token_name = Some(token.token_name.clone());
        }
        config.machine_id = Some(machine_id);
        config.save(&config_path)?;

        println!();
        println!("{}", "✓ Login successful!".green());
        println!();
        println!("  Credentials saved to: {}", config_path.display());
        if !token.token_name.is_empty() {
            println!("  Token name: {}", token.token_name);
        }
        println!("  Token expires: {}", format_date(&token.expires_at));
        println!();
        println!("You can now use ankra CLI commands. Try:");
        println!("  ankra cluster list");
        println!();

        Ok(())
    }
}

impl LogoutCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let config_path = config_path(global)?;
        let mut config = CliConfig::load(&config_path)?;

        if config.token.is_none() {
            println!("No credentials found.");
            return Ok(());
        }

        config.token = None;
        config.base_url = None;
        config.token_id = None;
        config.token_name = None;
        config.save(&config_path)?;

        println!("Logged out successfully.");
        println!(
            "Your credentials have been removed from {}",
            config_path.display()
        );
        Ok(())
    }
}

fn config_path(global: &GlobalArgs) -> anyhow::Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => Ok(CliConfig::default_path()?),
    }
}

fn generate_code_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn generate_code_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// Accept exactly one `/callback` request, verify the state parameter and
/// return the authorization code. Other paths get a 404 and the listener
/// keeps waiting.
async fn wait_for_callback(listener: TcpListener, expected_state: &str) -> anyhow::Result<String> {
    loop {
        let (mut stream, _) = listener.accept().await.context("accept callback")?;

        let mut buf = vec![0u8; 4096];
        let n = stream.read(&mut buf).await.unwrap_or(0);
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let Some(path) = request_path(&request) else {
            respond(&mut stream, "400 Bad Request", "text/plain", "Bad request").await;
            continue;
        };

        if !path.starts_with("/callback") {
            respond(&mut stream, "404 Not Found", "text/plain", "Not found").await;
            continue;
        }

        let parsed = url::Url::parse(&format!("http://localhost{path}"))?;
        let query: std::collections::HashMap<_, _> = parsed.query_pairs().collect();
        let state = query.get("state").map(|s| s.to_string()).unwrap_or_default();
        let code = query.get("code").map(|s| s.to_string()).unwrap_or_default();

        if state != expected_state {
            respond(
                &mut stream,
                "400 Bad Request",
                "text/plain",
                "Invalid state parameter",
            )
            .await;
            bail!("state mismatch in login callback");
        }

        if code.is_empty() {
            respond(
                &mut stream,
                "400 Bad Request",
                "text/plain",
                "Missing authorization code",
            )
            .await;
            bail!("missing authorization code in login callback");
        }

        respond(&mut stream, "200 OK", "text/html", SUCCESS_HTML).await;
        return Ok(code);
    }
}

fn request_path(request: &str) -> Option<&str> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    if parts.next()? != "GET" {
        return None;
    }
    parts.next()
}

async fn respond(stream: &mut TcpStream, status: &str, content_type: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    if let Err(e) = stream.write_all(response.as_bytes()).await {
        warn!(error = %e, "failed to write callback response");
    }
}

/// Stable machine identifier, cached in the config file.
fn get_or_create_machine_id(config_path: &std::path::Path) -> anyhow::Result<String> {
    let mut config = CliConfig::load(config_path).unwrap_or_default();
    if let Some(id) = config.machine_id.as_deref() {
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }

    // HOSTNAME is shell-local and often not exported, so fall back to the
    // system hostname file before giving up.
    let hostname = hostname_from(
        std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .ok(),
        std::path::Path::new("/etc/hostname"),
    );
    let username = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let machine_id = format!(
        "{}-{}",
        sanitize_identifier(&hostname)?,
        sanitize_identifier(&username)?
    );

    config.machine_id = Some(machine_id.clone());
    config.save(config_path)?;
    Ok(machine_id)
}

fn hostname_from(env_value: Option<String>, hostname_file: &std::path::Path) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            std::fs::read_to_string(hostname_file)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn sanitize_identifier(raw: &str) -> anyhow::Result<String> {
    let lowered = raw.to_lowercase().replace([' ', '_', '.'], "-");
    let re = Regex::new(r"[^a-z0-9-]")?;
    let mut cleaned = re.replace_all(&lowered, "").to_string();
    cleaned.truncate(MACHINE_ID_PART_MAX);
    Ok(cleaned)
}

const SUCCESS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Login Successful - Ankra CLI</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            background: #1f2937;
            color: #fff;
        }
        .card {
            background: #374151;
            border: 1px solid #4b5563;
            border-radius: 16px;
            padding: 40px 48px;
            max-width: 420px;
            text-align: center;
        }
        .success-icon {
            width: 56px;
            height: 56px;
            background: linear-gradient(135deg, #10b981 0%, #059669 100%);
            border-radius: 50%;
            display: flex;
            align-items: center;
            justify-content: center;
            margin: 0 auto 24px;
            font-size: 28px;
        }
        h1 { font-size: 24px; margin-bottom: 12px; }
        .subtitle { font-size: 16px; color: #9ca3af; margin-bottom: 24px; }
        .config-path {
            background: #1f2937;
            border: 1px solid #4b5563;
            border-radius: 8px;
            padding: 12px 16px;
            font-size: 13px;
            color: #9ca3af;
        }
        .config-path code { color: #a78bfa; font-family: monospace; }
    </style>
</head>
<body>
    <div class="card">
        <div class="success-icon">✓</div>
        <h1>Login Successful!</h1>
        <p class="subtitle">You can close this window and return to your terminal.</p>
        <div class="config-path">
            Your credentials have been saved to <code>~/.ankra.yaml</code>
        </div>
    </div>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("Alice's MacBook Pro").unwrap(), "alices-macbook-pro");
        assert_eq!(sanitize_identifier("dev_box.local").unwrap(), "dev-box-local");
        assert_eq!(
            sanitize_identifier("a-very-long-hostname-that-keeps-going").unwrap(),
            "a-very-long-hostname"
        );
    }

    #[test]
    fn test_code_challenge_is_base64url_sha256() {
        let challenge = generate_code_challenge("test-verifier");
        let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(b"test-verifier"));
        assert_eq!(challenge, expected);
        assert!(!challenge.contains('='));
    }

    #[test]
    fn test_hostname_falls_back_to_system_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("hostname");
        std::fs::write(&file, "buildbox-03\n").unwrap();

        assert_eq!(
            hostname_from(Some("laptop".into()), &file),
            "laptop"
        );
        assert_eq!(hostname_from(None, &file), "buildbox-03");
        assert_eq!(hostname_from(Some("  ".into()), &file), "buildbox-03");
        assert_eq!(
            hostname_from(None, &dir.path().join("missing")),
            "unknown"
        );
    }

    #[test]
    fn test_verifier_is_unpadded_and_unique() {
        let a = generate_code_verifier();
        let b = generate_code_verifier();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(!a.contains('='));
    }
}

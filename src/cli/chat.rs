//! Chat with the platform assistant

use std::io::Write as _;

use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

use super::cluster::resolve_cluster;
use super::commands::GlobalArgs;
use crate::infrastructure::api::chat::{ChatMessage, ChatRequest};

#[derive(Parser, Debug, Clone)]
pub struct ChatCommand {
    /// Message to send; omit for an interactive session
    pub message: Option<String>,

    /// Scope the conversation to a cluster's Kubernetes context
    #[arg(long)]
    pub cluster: Option<String>,
}

impl ChatCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let cluster_id = match &self.cluster {
            Some(name) => Some(resolve_cluster(global, Some(name)).await?.id),
            None => None,
        };
        let client = global.client()?;

        let mut history: Vec<ChatMessage> = Vec::new();

        if let Some(message) = &self.message {
            return send(&client, cluster_id.as_deref(), message, &mut history).await;
        }

        match &self.cluster {
            Some(name) => println!("Chatting about cluster {}.", name.bold()),
            None => println!("Chatting with the Ankra assistant."),
        }
        println!("Type 'exit' to leave, 'clear' to start a fresh conversation.");
        println!();

        loop {
            let line: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(">")
                .allow_empty(true)
                .interact_text()?;
            let line = line.trim().to_string();

            match line.as_str() {
                "" => continue,
                "exit" | "quit" => break,
                "clear" => {
                    history.clear();
                    println!("Conversation cleared.");
                    continue;
                }
                _ => {}
            }

            if let Err(e) = send(&client, cluster_id.as_deref(), &line, &mut history).await {
                eprintln!("{} {e}", "Error:".red());
            }
        }
        Ok(())
    }
}

async fn send(
    client: &crate::ApiClient,
    cluster_id: Option<&str>,
    message: &str,
    history: &mut Vec<ChatMessage>,
) -> anyhow::Result<()> {
    let request = ChatRequest {
        query: message.to_string(),
        conversation_id: None,
        conversation_history: if history.is_empty() {
            None
        } else {
            Some(history.clone())
        },
    };

    let mut reply = String::new();
    let on_content = |content: &str| {
        print!("{content}");
        let _ = std::io::stdout().flush();
        reply.push_str(content);
    };

    match cluster_id {
        Some(id) => client.chat_cluster(id, &request, on_content).await?,
        None => client.chat_general(&request, on_content).await?,
    }
    println!();

    history.push(ChatMessage {
        role: "user".into(),
        content: message.to_string(),
    });
    history.push(ChatMessage {
        role: "assistant".into(),
        content: reply,
    });
    Ok(())
}

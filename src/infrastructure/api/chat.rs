// Copyright 2025 Ankra.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Streaming chat with the platform assistant over server-sent events

use futures::StreamExt;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::shared::error::{AnkraError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Deserialize)]
struct ChatEvent {
    #[serde(rename = "type", default)]
    event_type: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    error: String,
    #[serde(default)]
    done: bool,
}

impl ApiClient {
    /// Chat scoped to a cluster's Kubernetes context.
    pub async fn chat_cluster<F>(
        &self,
        cluster_id: &str,
        request: &ChatRequest,
        on_content: F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        self.chat_stream(
            &format!("/api/v1/org/clusters/{cluster_id}/kubernetes/chat"),
            request,
            on_content,
        )
        .await
    }

    /// Chat without a cluster context.
    pub async fn chat_general<F>(&self, request: &ChatRequest, on_content: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        self.chat_stream("/api/v1/chat/general", request, on_content)
            .await
    }

    async fn chat_stream<F>(&self, path: &str, request: &ChatRequest, mut on_content: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        let url = format!("{}{}", self.base_url(), path);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;

        let mut stream = resp.bytes_stream();
        let mut buffer = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim_end_matches('\r').to_string();
                buffer.drain(..=pos);
                let Some(payload) = line.strip_prefix("data:") else {
                    continue;
                };
                let payload = payload.trim();
                if payload.is_empty() || payload == "[DONE]" {
                    continue;
                }
                let event: ChatEvent = match serde_json::from_str(payload) {
                    Ok(event) => event,
                    // Partial frames can split across chunks; skip them.
                    Err(_) => continue,
                };
                match event.event_type.as_str() {
                    "error" => return Err(AnkraError::Api {
                        status: 0,
                        body: event.error,
                    }),
                    "done" => return Ok(()),
                    _ => {
                        if !event.content.is_empty() {
                            on_content(&event.content);
                        }
                        if event.done {
                            return Ok(());
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

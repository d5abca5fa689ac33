//! ChatApiClient - HTTP client for the external chat endpoint.
//!
//! Sends one `POST /chat` request per submission and adapts the backend
//! payload to the internal display shape. Transport failures and non-2xx
//! statuses never reach the caller; they collapse into a fixed apology
//! reply with no map data.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use nearbot_core::chat::{AssistantReply, ChatBackend, MapData};
use nearbot_core::config::BackendConfig;
use nearbot_core::geo::Location;
use nearbot_core::store::Store;
use nearbot_core::{NearbotError, Result};

/// Fixed reply shown when the backend cannot be reached.
pub const FALLBACK_REPLY: &str =
    "Sorry, I can't reach the server right now. Please try again later.";

/// Client for the external chat API.
#[derive(Clone)]
pub struct ChatApiClient {
    client: Client,
    chat_url: String,
}

impl ChatApiClient {
    /// Creates a client from the backend configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            chat_url: config.chat_url.clone(),
        })
    }

    async fn send_request(
        &self,
        message: &str,
        location: Option<Location>,
    ) -> Result<ChatResponseBody> {
        let body = ChatRequestBody {
            message: message.to_string(),
            latitude: location.map(|loc| loc.lat).unwrap_or(0.0),
            longitude: location.map(|loc| loc.lng).unwrap_or(0.0),
        };

        let response = self.client.post(&self.chat_url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(NearbotError::Http(format!(
                "Chat endpoint returned {}: {}",
                status, body_text
            )));
        }

        Ok(response.json().await?)
    }

    fn fallback() -> AssistantReply {
        AssistantReply::text_only(FALLBACK_REPLY)
    }
}

#[async_trait]
impl ChatBackend for ChatApiClient {
    async fn ask(&self, message: &str, location: Option<Location>) -> AssistantReply {
        match self.send_request(message, location).await {
            Ok(body) => adapt_response(body, location),
            Err(err) => {
                tracing::warn!("Chat backend request failed: {}", err);
                Self::fallback()
            }
        }
    }
}

/// Maps the backend response shape to the internal display shape.
///
/// The backend's `address` becomes the store's `description`; the location
/// the request was made with becomes the user marker.
fn adapt_response(body: ChatResponseBody, location: Option<Location>) -> AssistantReply {
    let store_markers = body
        .nearest_stores
        .into_iter()
        .map(|store| Store {
            name: store.name,
            lat: store.lat,
            lng: store.lng,
            description: store.address,
        })
        .collect();

    AssistantReply {
        text: body.reply,
        map_data: Some(MapData {
            user_marker: location,
            store_markers,
        }),
        trigger_location: body.trigger_location,
    }
}

#[derive(Serialize)]
struct ChatRequestBody {
    message: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    reply: String,
    #[serde(default)]
    nearest_stores: Vec<StoreDto>,
    #[serde(default)]
    trigger_location: bool,
}

#[derive(Deserialize)]
struct StoreDto {
    name: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serves one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, json_body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                json_body.len(),
                json_body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/chat", addr)
    }

    fn client_for(url: String) -> ChatApiClient {
        ChatApiClient::new(&BackendConfig {
            chat_url: url,
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_adapt_maps_address_to_description() {
        let body = ChatResponseBody {
            reply: "Here you go".to_string(),
            nearest_stores: vec![StoreDto {
                name: "A".to_string(),
                lat: 1.0,
                lng: 2.0,
                address: "X".to_string(),
            }],
            trigger_location: false,
        };
        let location = Some(Location::new(10.0, 106.0));

        let reply = adapt_response(body, location);
        let map_data = reply.map_data.unwrap();
        assert_eq!(map_data.user_marker, location);
        assert_eq!(
            map_data.store_markers,
            vec![Store {
                name: "A".to_string(),
                lat: 1.0,
                lng: 2.0,
                description: "X".to_string(),
            }]
        );
    }

    #[test]
    fn test_adapt_without_stores_keeps_empty_markers() {
        let body = ChatResponseBody {
            reply: "Hello".to_string(),
            nearest_stores: vec![],
            trigger_location: false,
        };
        let reply = adapt_response(body, None);
        let map_data = reply.map_data.unwrap();
        assert_eq!(map_data.user_marker, None);
        assert!(map_data.store_markers.is_empty());
    }

    #[tokio::test]
    async fn test_successful_reply_is_adapted() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"reply":"Found 1 store","nearest_stores":[{"name":"A","lat":1.0,"lng":2.0,"address":"X"}],"trigger_location":false}"#,
        )
        .await;

        let reply = client_for(url).ask("coffee", None).await;
        assert_eq!(reply.text, "Found 1 store");
        assert_eq!(reply.map_data.unwrap().store_markers.len(), 1);
        assert!(!reply.trigger_location);
    }

    #[tokio::test]
    async fn test_non_2xx_becomes_apology_with_no_map_data() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"detail":"Store data not loaded."}"#,
        )
        .await;

        let reply = client_for(url).ask("coffee", None).await;
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert!(reply.map_data.is_none());
        assert!(!reply.trigger_location);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_apology() {
        // Nothing listens here
        let reply = client_for("http://127.0.0.1:9/chat".to_string())
            .ask("coffee", None)
            .await;
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert!(reply.map_data.is_none());
    }

    #[tokio::test]
    async fn test_trigger_location_flag_survives_adaptation() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"reply":"Let me check where you are","trigger_location":true}"#,
        )
        .await;

        let reply = client_for(url).ask("near me?", None).await;
        assert!(reply.trigger_location);
    }
}

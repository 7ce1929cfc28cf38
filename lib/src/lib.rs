//! Telegram Bot API bindings for Rust
//! Provides a blocking client that posts messages to a chat or channel

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Failed to serialize message: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Telegram API error: {code} - {description}")]
    Api { code: i64, description: String },
}

/// Rich-text mode the Bot API uses to interpret `text`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
}

/// Envelope every Bot API method answers with.
/// `error_code` and `description` are only present when `ok` is false.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub description: String,
}

impl ApiResponse {
    pub fn into_result(self) -> Result<(), ChannelError> {
        if self.ok {
            Ok(())
        } else {
            Err(ChannelError::Api {
                code: self.error_code,
                description: self.description,
            })
        }
    }
}

/// Decode a raw `sendMessage` response body and interpret its acknowledgment
pub fn decode_response(body: &[u8]) -> Result<(), ChannelError> {
    let response: ApiResponse = serde_json::from_slice(body).map_err(ChannelError::Decode)?;
    response.into_result()
}

pub struct ChannelClient {
    base_url: String,
    client: Client,
}

impl ChannelClient {
    /// `api_url` is the Bot API root (e.g. `https://api.telegram.org`);
    /// the token becomes part of every method path.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, ChannelError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ChannelError::Request)?;

        Ok(Self {
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            client,
        })
    }

    /// Send a message to a chat. The HTTP status is ignored in favour of the
    /// `ok` flag, since failures come back as a JSON envelope with a 4xx status.
    pub fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<(), ChannelError> {
        let payload = SendMessagePayload {
            chat_id,
            text,
            parse_mode,
        };
        let body = serde_json::to_vec(&payload).map_err(ChannelError::Serialize)?;

        // Errors carry the request URL, which embeds the token
        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .map_err(|e| ChannelError::Request(e.without_url()))?;

        let bytes = response
            .bytes()
            .map_err(|e| ChannelError::Request(e.without_url()))?;

        decode_response(&bytes)
    }
}

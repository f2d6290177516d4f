use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-character frames sent by the push server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushFrame {
    /// `#`: keep-alive, nothing to do
    KeepAlive,
    /// `!`: new message(s) are waiting to be fetched
    NewMessage,
    /// `R`: reconnect
    Reload,
    /// `E`: permanent error, the device must log in again
    Error,
    /// `A`: another session logged in with this device
    SessionClosed,
    Unknown(String),
}

impl PushFrame {
    #[must_use]
    pub fn parse(frame: &str) -> Self {
        match frame.trim() {
            "#" => Self::KeepAlive,
            "!" => Self::NewMessage,
            "R" => Self::Reload,
            "E" => Self::Error,
            "A" => Self::SessionClosed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PushMessage {
    pub id: u64,
    pub message: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageList {
    pub status: i64,
    #[serde(default)]
    pub messages: Vec<PushMessage>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl MessageList {
    /// The most recent message is the last one in the list
    #[must_use]
    pub fn latest(&self) -> Option<&PushMessage> {
        self.messages.last()
    }

    #[must_use]
    pub fn highest_id(&self) -> Option<u64> {
        self.messages.iter().map(|msg| msg.id).max()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusReply {
    pub status: i64,
    #[serde(default)]
    pub errors: Vec<String>,
}

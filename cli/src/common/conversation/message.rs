//! # Conversation Messages
//!
//! File: cli/src/common/conversation/message.rs
//!
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One entry in the conversation log. Never changed after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub is_from_user: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Message {
    pub fn from_user(text: impl Into<String>) -> Self {
        Self::new(text.into(), true, None)
    }

    pub fn from_bot(text: impl Into<String>, image_url: Option<String>) -> Self {
        Self::new(text.into(), false, image_url)
    }

    fn new(text: String, is_from_user: bool, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            is_from_user,
            created_at: Utc::now(),
            image_url,
        }
    }
}

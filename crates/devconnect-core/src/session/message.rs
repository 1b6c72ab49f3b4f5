//! Conversation message types.
//!
//! This module contains types for representing messages in a chat, including
//! roles, text content and shared file attachments.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the persona.
    Assistant,
}

/// Coarse classification of an attachment, derived from its media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Video,
    Other,
}

impl AttachmentKind {
    /// Classifies a declared media type by substring, e.g. `image/png` is an image.
    pub fn from_media_type(media_type: &str) -> Self {
        let lower = media_type.to_ascii_lowercase();
        if lower.contains("image") {
            AttachmentKind::Image
        } else if lower.contains("video") {
            AttachmentKind::Video
        } else {
            AttachmentKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Video => "video",
            AttachmentKind::Other => "file",
        }
    }
}

/// A file shared into the chat.
///
/// The payload is carried opaquely for the renderer; the core only reads the
/// media type and the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Raw file bytes (not serialized)
    #[serde(skip)]
    pub data: Arc<Vec<u8>>,
    /// Declared media type, e.g. `image/png`
    pub media_type: String,
    /// File name as shared by the user
    pub file_name: String,
}

impl Attachment {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            data: Arc::new(data),
            media_type: media_type.into(),
            file_name: file_name.into(),
        }
    }

    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_media_type(&self.media_type)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A single message in a chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// Text content, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Shared file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Timestamp when the message was created (RFC 3339).
    pub timestamp: String,
}

impl Message {
    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }

    /// A plain text message from the user.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: Some(text.into()),
            attachment: None,
            timestamp: Self::now(),
        }
    }

    /// A user message announcing a shared file.
    pub fn user_attachment(attachment: Attachment) -> Self {
        Self {
            role: MessageRole::User,
            content: Some(format!("Shared a file: {}", attachment.file_name)),
            attachment: Some(attachment),
            timestamp: Self::now(),
        }
    }

    /// A reply from the persona.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: Some(text.into()),
            attachment: None,
            timestamp: Self::now(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_media_type() {
        assert_eq!(AttachmentKind::from_media_type("image/png"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_media_type("video/mp4"), AttachmentKind::Video);
        assert_eq!(AttachmentKind::from_media_type("text/x-rust"), AttachmentKind::Other);
        assert_eq!(AttachmentKind::from_media_type(""), AttachmentKind::Other);
    }

    #[test]
    fn test_user_attachment_content() {
        let attachment = Attachment::new(vec![1, 2, 3], "image/jpeg", "mockup.jpg");
        let message = Message::user_attachment(attachment);
        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.text(), Some("Shared a file: mockup.jpg"));
        assert_eq!(message.attachment.as_ref().map(Attachment::size), Some(3));
    }

    #[test]
    fn test_serialization_skips_payload() {
        let attachment = Attachment::new(vec![0xff; 16], "video/mp4", "demo.mp4");
        let json = serde_json::to_value(Message::user_attachment(attachment)).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["attachment"]["file_name"], "demo.mp4");
        assert!(json["attachment"].get("data").is_none());
    }
}

//! Prompt templates for matchmaking and roleplay.
//!
//! Each prompt is a serializable struct rendered through a Jinja template.

use devconnect_core::persona::PersonaRecord;
use devconnect_core::session::AttachmentKind;
use minijinja::Environment;
use serde::Serialize;

/// Renders a serializable prompt struct through its Jinja template.
pub trait ToPrompt: Serialize {
    const TEMPLATE: &'static str;

    fn to_prompt(&self) -> Result<String, minijinja::Error> {
        let env = Environment::new();
        env.render_str(Self::TEMPLATE, self)
    }
}

/// Instruction asking the model to pick one persona for a user.
#[derive(Debug, Clone, Serialize)]
pub struct MatchmakingPrompt<'a> {
    pub user_bio: &'a str,
    /// The whole directory as a JSON array
    pub community_json: &'a str,
}

impl ToPrompt for MatchmakingPrompt<'_> {
    const TEMPLATE: &'static str = r#"Act as a CTO matchmaker.
User Bio: "{{ user_bio }}"
Community Database: {{ community_json }}

Task: Select the ONE best person from the database to work with this user.
The "name" value must be copied exactly from the database.
Return JSON only: {"name": "Name from DB", "reason": "Why"}"#;
}

/// What the persona should know about a file the user just shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentHint {
    pub file_name: String,
    pub kind: AttachmentKind,
}

impl AttachmentHint {
    pub fn new(file_name: impl Into<String>, kind: AttachmentKind) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
        }
    }
}

impl From<&devconnect_core::session::Attachment> for AttachmentHint {
    fn from(attachment: &devconnect_core::session::Attachment) -> Self {
        Self::new(attachment.file_name.clone(), attachment.kind())
    }
}

/// Single-turn roleplay instruction.
#[derive(Debug, Clone, Serialize)]
pub struct RoleplayPrompt<'a> {
    pub persona: &'a PersonaRecord,
    pub user_message: &'a str,
    pub attachment: Option<&'a AttachmentHint>,
}

impl ToPrompt for RoleplayPrompt<'_> {
    const TEMPLATE: &'static str = r#"ROLEPLAY INSTRUCTION:
You are {{ persona.name }}.
Role: {{ persona.role }}
Bio: {{ persona.bio }}
Personality: {{ persona.style }}
Tech Stack: {{ persona.stack }}

Current Chat Context: User said "{{ user_message }}"
{%- if attachment %}
USER JUST SENT A FILE: {{ attachment.file_name }} ({{ attachment.kind }}).
{%- if attachment.kind == "image" %}
React to receiving this image based on your personality (comment on the design and visuals).
{%- elif attachment.kind == "video" %}
React to receiving this video based on your personality (comment on what the clip shows).
{%- else %}
React to receiving this file based on your personality (e.g. if code, comment on the logic).
{%- endif %}
{%- endif %}

Reply as {{ persona.name }}.
- Keep it short (under 40 words).
- Be helpful but stay in character.
- If you are "Blunt", be blunt. If "Humble", be humble."#;
}

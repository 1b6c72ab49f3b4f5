//! Persona domain model.
//!
//! Represents a simulated community member that can be matched with the user
//! and chatted with.

use serde::{Deserialize, Serialize};

/// A developer persona from the community roster.
///
/// Serializes with the field names used in the matchmaking prompt, so the
/// model sees exactly the names it has to answer with.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonaRecord {
    /// Unique numeric identifier
    pub id: u32,
    /// Display name, unique within a directory and used as lookup key
    pub name: String,
    /// Role or title
    pub role: String,
    /// Technology stack (free text)
    pub stack: String,
    /// Short biography in the persona's own voice
    pub bio: String,
    /// Avatar glyph
    pub avatar: String,
    /// Personality style descriptor
    pub style: String,
}

impl PersonaRecord {
    /// Returns the first word of the display name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        let persona = PersonaRecord {
            id: 1,
            name: "Alice Chen".to_string(),
            role: "Frontend Architect".to_string(),
            stack: "React".to_string(),
            bio: "Pixels.".to_string(),
            avatar: "🎨".to_string(),
            style: "Visual & Creative".to_string(),
        };
        assert_eq!(persona.first_name(), "Alice");
    }

    #[test]
    fn test_serializes_prompt_field_names() {
        let persona = PersonaRecord {
            id: 7,
            name: "Greg House".to_string(),
            role: "Cybersecurity".to_string(),
            stack: "Kali Linux".to_string(),
            bio: "Breaks things.".to_string(),
            avatar: "🔒".to_string(),
            style: "Paranoid & Careful".to_string(),
        };
        let value = serde_json::to_value(&persona).unwrap();
        for key in ["id", "name", "role", "stack", "bio", "avatar", "style"] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
    }
}

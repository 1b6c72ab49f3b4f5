//! Read-only persona directory.

use std::collections::HashSet;

use super::model::PersonaRecord;
use super::preset::get_default_roster;
use crate::error::{DevConnectError, Result};

/// Immutable, ordered collection of personas with lookup by name or id.
///
/// Lookups never fall back to another persona: a miss is reported as
/// [`DevConnectError::UnknownPersona`] and the caller treats the persona as
/// having left.
#[derive(Debug, Clone)]
pub struct PersonaDirectory {
    personas: Vec<PersonaRecord>,
}

impl PersonaDirectory {
    /// Builds the directory from the built-in community roster.
    pub fn builtin() -> Self {
        Self {
            personas: get_default_roster(),
        }
    }

    /// Builds a directory from arbitrary records, rejecting duplicate names or ids.
    pub fn from_records(personas: Vec<PersonaRecord>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for persona in &personas {
            if !names.insert(persona.name.as_str()) {
                return Err(DevConnectError::DuplicatePersona(persona.name.clone()));
            }
            if !ids.insert(persona.id) {
                return Err(DevConnectError::DuplicatePersona(format!(
                    "id {}",
                    persona.id
                )));
            }
        }
        Ok(Self { personas })
    }

    /// All personas in roster order.
    pub fn all(&self) -> &[PersonaRecord] {
        &self.personas
    }

    /// Looks a persona up by exact name.
    pub fn find_by_name(&self, name: &str) -> Result<&PersonaRecord> {
        self.personas
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DevConnectError::unknown_persona(name))
    }

    /// Looks a persona up by id.
    pub fn find_by_id(&self, id: u32) -> Result<&PersonaRecord> {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DevConnectError::unknown_persona(format!("#{id}")))
    }

    /// Number of community members.
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Serializes the whole roster as a JSON array for prompt embedding.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.personas)?)
    }
}

impl Default for PersonaDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roster_has_twelve_members() {
        let directory = PersonaDirectory::builtin();
        assert_eq!(directory.len(), 12);
        assert_eq!(directory.all()[0].name, "Alice Chen");
        assert_eq!(directory.all()[11].name, "Leo Messi");
    }

    #[test]
    fn test_builtin_names_and_ids_are_unique() {
        let roster = get_default_roster();
        let expected = roster.len();
        let directory = PersonaDirectory::from_records(roster).expect("roster is unique");
        let names: HashSet<_> = directory.all().iter().map(|p| p.name.as_str()).collect();
        let ids: HashSet<_> = directory.all().iter().map(|p| p.id).collect();
        assert_eq!(names.len(), expected);
        assert_eq!(ids.len(), expected);
    }

    #[test]
    fn test_find_by_name_resolves_every_member_to_itself() {
        let directory = PersonaDirectory::builtin();
        for persona in directory.all() {
            let found = directory.find_by_name(&persona.name).unwrap();
            assert_eq!(found, persona);
        }
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let directory = PersonaDirectory::builtin();
        assert!(directory.find_by_name("Bob Smith").is_ok());
        let err = directory.find_by_name("bob smith").unwrap_err();
        assert!(err.is_unknown_persona());
        assert!(directory.find_by_name("Bob").is_err());
    }

    #[test]
    fn test_find_by_id() {
        let directory = PersonaDirectory::builtin();
        assert_eq!(directory.find_by_id(4).unwrap().name, "Dana White");
        assert!(directory.find_by_id(99).unwrap_err().is_unknown_persona());
    }

    #[test]
    fn test_from_records_rejects_duplicate_names() {
        let mut roster = get_default_roster();
        let mut clone = roster[0].clone();
        clone.id = 100;
        roster.push(clone);
        let err = PersonaDirectory::from_records(roster).unwrap_err();
        assert_eq!(err, DevConnectError::DuplicatePersona("Alice Chen".to_string()));
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let mut roster = get_default_roster();
        let mut clone = roster[0].clone();
        clone.name = "Alice Clone".to_string();
        roster.push(clone);
        assert!(PersonaDirectory::from_records(roster).is_err());
    }

    #[test]
    fn test_to_json_lists_all_names() {
        let directory = PersonaDirectory::builtin();
        let json = directory.to_json().unwrap();
        let parsed: Vec<PersonaRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, directory.all());
    }
}

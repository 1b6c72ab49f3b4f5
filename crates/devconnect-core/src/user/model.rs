//! UserProfile domain model.
//!
//! Represents the person using the app: a display name and a free-text bio
//! that the matchmaker reads.

use serde::{Deserialize, Serialize};

use crate::error::{DevConnectError, Result};

/// User profile domain model.
///
/// Created once at login and never mutated; logout discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User's display name
    pub name: String,
    /// Skills and interests
    pub bio: String,
}

/// Request to create a profile, as submitted by the join form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    /// Display name (required)
    pub name: String,
    /// Skills and interests (may be empty)
    #[serde(default)]
    pub bio: String,
}

impl CreateProfileRequest {
    pub fn new(name: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: bio.into(),
        }
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DevConnectError::validation(
                "Name is required and cannot be empty",
            ));
        }
        Ok(())
    }

    /// Validates and converts the request into a profile with trimmed fields.
    pub fn into_profile(self) -> Result<UserProfile> {
        self.validate()?;
        Ok(UserProfile {
            name: self.name.trim().to_string(),
            bio: self.bio.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_success() {
        let req = CreateProfileRequest::new("Sam", "loves Go backends");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let req = CreateProfileRequest::new("   ", "bio");
        assert!(matches!(
            req.validate(),
            Err(DevConnectError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_bio_is_allowed() {
        let profile = CreateProfileRequest::new("Sam", "").into_profile().unwrap();
        assert_eq!(profile.bio, "");
    }

    #[test]
    fn test_into_profile_trims() {
        let profile = CreateProfileRequest::new("  Sam ", " Go \n")
            .into_profile()
            .unwrap();
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.bio, "Go");
    }
}

//! Persona domain module.
//!
//! This module contains the persona record, the built-in community roster and
//! the read-only directory used to look personas up.
//!
//! # Module Structure
//!
//! - `model`: Persona record (`PersonaRecord`)
//! - `preset`: Built-in community roster
//! - `directory`: Read-only lookup (`PersonaDirectory`)
//!
//! # Usage
//!
//! ```ignore
//! use devconnect_core::persona::{PersonaDirectory, PersonaRecord};
//! ```

mod directory;
mod model;
mod preset;

// Re-export public API
pub use directory::PersonaDirectory;
pub use model::PersonaRecord;
pub use preset::get_default_roster;

//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User profile domain model and its creation request
//!
//! # Usage
//!
//! ```ignore
//! use devconnect_core::user::{CreateProfileRequest, UserProfile};
//! ```

mod model;

// Re-export public API
pub use model::{CreateProfileRequest, UserProfile};

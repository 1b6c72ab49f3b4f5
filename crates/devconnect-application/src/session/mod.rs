//! Session bookkeeping for hosts that serve more than one user.

mod registry;

pub use registry::SessionRegistry;

//! Auth Module
//!
//! Credential validation and verification against the user store.

pub mod credentials;
pub mod outcome;
pub mod task;
pub mod verifier;

// Re-exports
pub use credentials::{Credentials, ValidationError};
pub use outcome::VerificationOutcome;
pub use task::VerificationTask;
pub use verifier::{SqliteVerifier, Verifier};

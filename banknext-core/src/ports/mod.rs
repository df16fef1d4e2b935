//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces the session and request layers depend on.
//! Adapters provide the concrete implementations.

mod credential_source;
mod session_storage;

pub use credential_source::{CredentialSource, NoCredential};
pub use session_storage::{SessionStorage, TOKEN_KEY, USER_KEY};

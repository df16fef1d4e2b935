//! Credential source port

use crate::domain::Credential;

/// Where the request client looks up the credential for each request.
///
/// Called once per outgoing request, so implementations should return the
/// state current at that moment rather than a copy taken at construction.
pub trait CredentialSource: Send + Sync {
    fn credential(&self) -> Option<Credential>;
}

/// Source for clients that never authenticate
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredential;

impl CredentialSource for NoCredential {
    fn credential(&self) -> Option<Credential> {
        None
    }
}

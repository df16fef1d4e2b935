//! Session store - who is logged in, in memory and across runs
//!
//! The in-memory state lives behind a [`SessionHandle`] that anyone may
//! clone and read. Only [`SessionStore`] writes to it, and only from
//! `restore`, `login`, `register` and `logout`. The request client holds a
//! handle as its [`CredentialSource`], so a credential stored here is on the
//! very next request, and gone from it after logout.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::result::{OperationResult, Result};
use crate::domain::{AuthResponse, Credential, RegisterRequest, UserProfile};
use crate::ports::{CredentialSource, SessionStorage, TOKEN_KEY, USER_KEY};

use super::auth::AuthApi;

/// Fallback shown when a failed login has no server message
pub const LOGIN_FAILED: &str = "Login failed";

/// Fallback shown when a failed registration has no server message
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Point-in-time view of the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub credential: Option<Credential>,
    pub profile: Option<UserProfile>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}

/// Shared read access to the current session
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .credential
            .clone()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .profile
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    /// Customer id from the cached profile
    pub fn customer_id(&self) -> Option<String> {
        self.profile().and_then(|p| p.customer_id)
    }

    pub(crate) fn replace(&self, state: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

impl CredentialSource for SessionHandle {
    fn credential(&self) -> Option<Credential> {
        SessionHandle::credential(self)
    }
}

/// Owner of the session: the only writer of the handle and of the
/// persisted `token` / `user` keys
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    handle: SessionHandle,
    auth: AuthApi,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, handle: SessionHandle, auth: AuthApi) -> Self {
        Self {
            storage,
            handle,
            auth,
        }
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Load the session a previous run left behind.
    ///
    /// A profile that no longer parses is dropped and removed from storage;
    /// the credential is kept either way. A profile without a credential is
    /// ignored.
    pub fn restore(&self) -> Result<SessionState> {
        let credential = self
            .storage
            .get(TOKEN_KEY)?
            .map(Credential::new)
            .filter(|c| !c.is_empty());

        let Some(credential) = credential else {
            self.handle.replace(SessionState::default());
            tracing::debug!("no stored session");
            return Ok(SessionState::default());
        };

        let profile = match self.storage.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable cached profile");
                    if let Err(e) = self.storage.remove(USER_KEY) {
                        tracing::warn!(error = %e, "failed to remove cached profile");
                    }
                    None
                }
            },
            None => None,
        };

        let state = SessionState {
            credential: Some(credential),
            profile,
        };
        self.handle.replace(state.clone());
        tracing::debug!(has_profile = state.profile.is_some(), "session restored");
        Ok(state)
    }

    /// Authenticate and, on success, remember the session.
    ///
    /// On failure the current session is left exactly as it was and the
    /// error is the server's message or "Login failed".
    pub fn login(&self, email: &str, password: &str) -> OperationResult<UserProfile> {
        let result = self
            .auth
            .login(email, password)
            .and_then(|response| self.establish(response));
        if let Err(e) = &result {
            tracing::warn!(error = %e, "login failed");
        }
        OperationResult::from_result(result, LOGIN_FAILED)
    }

    /// Create a customer and log in as them
    pub fn register(&self, request: &RegisterRequest) -> OperationResult<UserProfile> {
        let result = self
            .auth
            .register(request)
            .and_then(|response| self.establish(response));
        if let Err(e) = &result {
            tracing::warn!(error = %e, "registration failed");
        }
        OperationResult::from_result(result, REGISTRATION_FAILED)
    }

    /// Forget the session in memory and in storage
    pub fn logout(&self) -> Result<()> {
        self.handle.replace(SessionState::default());
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Persist a fresh session, then publish it to the handle
    fn establish(&self, response: AuthResponse) -> Result<UserProfile> {
        let AuthResponse { token, profile } = response;
        let profile_json = serde_json::to_string(&profile)?;

        let previous_token = self.storage.get(TOKEN_KEY)?;
        let previous_user = self.storage.get(USER_KEY)?;

        let persisted = self
            .storage
            .set(TOKEN_KEY, token.expose())
            .and_then(|_| self.storage.set(USER_KEY, &profile_json));

        if let Err(e) = persisted {
            self.rollback(TOKEN_KEY, previous_token.as_deref());
            self.rollback(USER_KEY, previous_user.as_deref());
            return Err(e);
        }

        self.handle.replace(SessionState {
            credential: Some(token),
            profile: Some(profile.clone()),
        });
        tracing::debug!("session established");
        Ok(profile)
    }

    fn rollback(&self, key: &str, previous: Option<&str>) {
        let restored = match previous {
            Some(value) => self.storage.set(key, value),
            None => self.storage.remove(key),
        };
        if let Err(e) = restored {
            tracing::warn!(key, error = %e, "failed to restore session key");
        }
    }
}

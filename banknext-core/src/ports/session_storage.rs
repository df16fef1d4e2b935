//! Persistent session storage port

use crate::domain::result::Result;

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized user profile
pub const USER_KEY: &str = "user";

/// Key/value storage that survives process restarts.
///
/// Values are opaque strings; the session store decides what goes in them.
/// Implementations must make a completed `set` or `remove` visible to the
/// next `get`, including one from a new process.
pub trait SessionStorage: Send + Sync {
    /// Read a value, `None` if the key was never set or was removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

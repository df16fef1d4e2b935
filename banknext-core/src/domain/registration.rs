//! Registration payload

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register`.
///
/// The CNIC is the national identity number, treated as an opaque string.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub cnic: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("date_of_birth", &self.date_of_birth)
            .finish_non_exhaustive()
    }
}

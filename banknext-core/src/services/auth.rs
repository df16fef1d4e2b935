//! Authentication endpoints

use std::sync::Arc;

use serde::Serialize;

use crate::adapters::http::ApiClient;
use crate::domain::result::Result;
use crate::domain::{AuthResponse, RegisterRequest};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Thin bindings for `/auth/*`. Session bookkeeping lives in
/// [`SessionStore`](super::SessionStore), not here.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `POST /auth/login`
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.client
            .post_json(&["auth", "login"], &LoginRequest { email, password })
    }

    /// `POST /auth/register`
    pub fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.client.post_json(&["auth", "register"], request)
    }
}

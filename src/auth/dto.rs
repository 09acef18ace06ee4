use serde::{Deserialize, Serialize};

/// Request body shared by signup and signin.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after signup or signin.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

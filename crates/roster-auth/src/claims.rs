use serde::{Deserialize, Serialize};

/// Payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username (subject claim)
    pub sub: String,
    /// Role names assigned to the user at issue time
    pub roles: Vec<String>,
    /// Issuer, checked against the configured issuer on verification
    pub iss: String,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
}

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Why a token could not be created or verified.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("failed to create token: {0}")]
    Encoding(#[source] JwtError),
}

impl TokenError {
    /// Classifies a decoding failure. Issuer mismatch, missing claims and
    /// any other rejection count as malformed.
    pub fn from_decode_error(err: &JwtError) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

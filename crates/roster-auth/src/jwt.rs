//! Token creation and verification.
//!
//! Tokens are HS256-signed and carry the username as `sub`, the assigned
//! role names, the configured issuer and `iat`/`exp` timestamps.
//!
//! # Example
//!
//! ```ignore
//! use roster_auth::{AuthenticatedUser, create_token, verify_token};
//!
//! let token = create_token(&AuthenticatedUser::new("user", ["user"]), &jwt_config)?;
//! let user = verify_token(&token, &jwt_config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use roster_config::JwtConfig;

use crate::claims::Claims;
use crate::error::TokenError;
use crate::user::AuthenticatedUser;

/// Signs a token for `user` that expires `jwt_config.token_expiry` seconds
/// from now.
///
/// # Errors
///
/// Returns [`TokenError::Encoding`] if signing fails.
pub fn create_token(user: &AuthenticatedUser, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.token_expiry;

    let claims = Claims {
        sub: user.username.clone(),
        roles: user.roles.iter().cloned().collect(),
        iss: jwt_config.issuer.clone(),
        iat: now as usize,
        exp: exp as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

/// Verifies signature, expiry and issuer and returns the caller identity.
///
/// # Errors
///
/// - [`TokenError::Expired`] when `exp` has passed
/// - [`TokenError::InvalidSignature`] when the signature does not match
/// - [`TokenError::Malformed`] for anything else, issuer mismatch included
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<AuthenticatedUser, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[jwt_config.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| AuthenticatedUser::from(data.claims))
    .map_err(|e| TokenError::from_decode_error(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            issuer: "roster-test".to_string(),
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 3600,
        }
    }

    fn sign_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = get_test_jwt_config();
        let user = AuthenticatedUser::new("super", ["user", "admin"]);

        let token = create_token(&user, &config).unwrap();
        let verified = verify_token(&token, &config).unwrap();

        assert_eq!(verified, user);
    }

    #[test]
    fn test_token_expiry_matches_config() {
        let config = get_test_jwt_config();
        let token = create_token(&AuthenticatedUser::new("user", ["user"]), &config).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        assert_eq!(data.claims.exp - data.claims.iat, 3600);
        assert_eq!(data.claims.iss, "roster-test");
    }

    #[test]
    fn test_expired_token() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user".to_string(),
            roles: vec!["user".to_string()],
            iss: config.issuer.clone(),
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = sign_raw(&claims, &config.secret);
        assert!(matches!(
            verify_token(&token, &config),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let config = get_test_jwt_config();
        let token = create_token(&AuthenticatedUser::new("user", ["user"]), &config).unwrap();

        let other = JwtConfig {
            secret: "another-secret-key-at-least-32-characters".to_string(),
            ..config
        };
        assert!(matches!(
            verify_token(&token, &other),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_issuer_is_malformed() {
        let config = get_test_jwt_config();
        let token = create_token(&AuthenticatedUser::new("user", ["user"]), &config).unwrap();

        let other = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config
        };
        assert!(matches!(
            verify_token(&token, &other),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let config = get_test_jwt_config();
        for token in ["", "not-a-token", "a.b.c"] {
            assert!(
                matches!(verify_token(token, &config), Err(TokenError::Malformed)),
                "{token}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TokenError::Expired.to_string(), "token has expired");
        assert_eq!(TokenError::Malformed.to_string(), "token is malformed");
    }
}

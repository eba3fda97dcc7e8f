use std::collections::HashMap;

use roster_auth::{AuthenticatedUser, TokenError, create_token, verify_token};
use roster_config::JwtConfig;

fn config_from(pairs: &[(&str, &str)]) -> JwtConfig {
    let values: HashMap<&str, &str> = pairs.iter().copied().collect();
    JwtConfig::from_lookup(|key| values.get(key).map(|v| v.to_string())).unwrap()
}

#[test]
fn test_token_from_properties_style_config() {
    let config = config_from(&[
        ("ISSUER", "Roster"),
        ("SECRET_KEY", "test-secret-key-at-least-32-characters-long"),
        ("TOKEN_EXPIRE_TIME", "1800000"),
    ]);
    assert_eq!(config.token_expiry, 1800);

    let user = AuthenticatedUser::new("super", ["user", "admin"]);
    let token = create_token(&user, &config).unwrap();

    assert_eq!(verify_token(&token, &config).unwrap(), user);
}

#[test]
fn test_tokens_do_not_cross_issuers() {
    let secret = "test-secret-key-at-least-32-characters-long";
    let first = config_from(&[
        ("ISSUER", "first"),
        ("SECRET_KEY", secret),
        ("TOKEN_EXPIRE_TIME", "60000"),
    ]);
    let second = JwtConfig {
        issuer: "second".to_string(),
        ..first.clone()
    };

    let token = create_token(&AuthenticatedUser::new("user", ["user"]), &first).unwrap();
    assert!(matches!(
        verify_token(&token, &second),
        Err(TokenError::Malformed)
    ));
}

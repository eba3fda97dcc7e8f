//! # Roster Auth
//!
//! Authentication and authorization building blocks for the Roster API.
//!
//! - [`roles`]: the [`Role`] enum and per-route [`RouteAccess`] requirements
//! - [`user`]: the [`AuthenticatedUser`] derived from a verified token
//! - [`claims`]: the signed token payload
//! - [`jwt`]: token creation and verification
//! - [`error`]: [`TokenError`] classification of verification failures
//!
//! # Example
//!
//! ```ignore
//! use roster_auth::{AuthenticatedUser, create_token, verify_token};
//! use roster_config::JwtConfig;
//!
//! let config = JwtConfig::resolve()?;
//! let user = AuthenticatedUser::new("admin", ["admin"]);
//!
//! let token = create_token(&user, &config)?;
//! let verified = verify_token(&token, &config)?;
//! assert_eq!(verified.username, "admin");
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod roles;
pub mod user;

pub use claims::Claims;
pub use error::TokenError;
pub use jwt::{create_token, verify_token};
pub use roles::{Role, RouteAccess, UnknownRole, format_role_set};
pub use user::AuthenticatedUser;

//! # Roster Config
//!
//! Configuration types for the Roster API, resolved once at startup.
//!
//! - [`jwt`]: token issuer, signing secret and lifetime
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen address and metrics port
//! - [`cors`]: allowed CORS origins
//! - [`properties`]: `KEY=value` properties file reader
//!
//! # Example
//!
//! ```ignore
//! use roster_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::resolve()?;
//! let database_config = DatabaseConfig::from_env()?;
//! let server_config = ServerConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod properties;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

//! # Roster Core
//!
//! Foundational types shared by every Roster crate:
//!
//! - [`errors`]: the application error type and its HTTP rendering
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use roster_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("user123")?;
//! if !verify_password("user123", &hash)? {
//!     return Err(AppError::unauthorized("Wrong username or password"));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};

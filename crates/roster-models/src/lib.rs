//! # Roster Models
//!
//! Domain entities and transfer objects for the Roster API.
//!
//! - [`persons`]: database-backed persons and their request/response shapes
//! - [`open_persons`]: the in-memory demo persons
//! - [`users`]: users, role assignment requests and user responses
//! - [`auth`]: login/register requests and token/message responses

pub mod auth;
pub mod open_persons;
pub mod persons;
pub mod users;

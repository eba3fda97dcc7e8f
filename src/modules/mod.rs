pub mod auth;
pub mod open_persons;
pub mod persons;
pub mod protected;

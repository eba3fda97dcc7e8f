pub mod controller;
pub mod dao;
pub mod router;

pub use router::init_auth_routes;

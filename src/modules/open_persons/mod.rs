pub mod controller;
pub mod router;
pub mod store;

pub use router::init_open_persons_routes;
pub use store::OpenPersonStore;

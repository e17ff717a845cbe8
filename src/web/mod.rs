pub mod routes;
pub mod server;

pub use server::{WebServer, build_router};

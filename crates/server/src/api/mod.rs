pub mod approaches;
pub mod handlers;
pub mod middleware;
pub mod objects;
pub mod routes;

pub use routes::create_router;

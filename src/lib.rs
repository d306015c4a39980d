pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod normalize;
pub mod response;
pub mod routes;
pub mod schemas;
pub mod services;
pub mod state;

pub use routes::router;
pub use state::AppState;

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;

pub use routes::{api_router, create_app};
pub use state::AppState;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use config::Config;
pub use error::PortagenError;
pub use router::{PortagenState, portagen_router};

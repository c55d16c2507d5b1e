// homewatch-api: Async Rust client for the homewatch monitoring backend

pub mod actuators;
pub mod alarm;
pub mod client;
pub mod error;
pub mod models;
pub mod nodes;
pub mod transport;

pub use client::HomeClient;
pub use error::Error;
pub use models::Node;
pub use transport::{TlsMode, TransportConfig};

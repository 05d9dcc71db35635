//! # calc_server
//!
//! A small asynchronous HTTP server built on Tokio and Hyper that:
//!
//! - serves static files from a public directory (`GET /...`, `/` falls back to `index.html`),
//!   refusing any path that would escape the directory;
//! - answers `POST /calculate` with `{"operation": "add"|"subtract", "left": .., "right": ..}`
//!   by returning `{"result": ..}` or `{"error": ..}`.
//!
//! Every other method gets `405 Method Not Allowed`.
//!
//! ## Modules
//!
//! - [`config`] - layered configuration (defaults + environment) and shared state
//! - [`handler`] - routing, static files and the calculate endpoint
//! - [`http`] - response builders and MIME detection
//! - [`server`] - listener, accept loop and graceful shutdown
//! - [`logger`] - `tracing` based lifecycle and access logging
//! - [`error`] - error types and their HTTP mapping
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_server::{AppState, Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let server = Server::bind(AppState::new(config)?)?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{AppState, Config};
pub use error::{CalculateError, ConfigError, ServerError, StaticFileError};
pub use server::Server;

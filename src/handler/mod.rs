//! Request handler module
//!
//! Responsible for request routing dispatch and the two request handlers: static files
//! and the calculate endpoint.

pub mod calculate;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

//! Request handler module
//!
//! Responsible for request routing dispatch and the responders it selects
//! between: static view files and the proxied daily-info document.

pub mod daily_info;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

//! HTTP protocol layer module
//!
//! Response construction shared by all handlers, decoupled from routing and
//! business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_500_response, build_file_response, build_json_response,
};

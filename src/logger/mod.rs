//! Logger module
//!
//! Event-driven logging for the server: a file logger subscriber that
//! renders published events into date-partitioned log files, the injected
//! clock it depends on, and console helpers for server lifecycle messages.

pub mod clock;
pub mod writer;

pub use writer::FileLogger;

use crate::config::Config;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Server started successfully");
    println!("Listening on: http://{addr}");
    println!("Routes: {}", config.routes.entries.len());
    println!("Log directory: {}", config.logging.dir);
    println!("======================================\n");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_accept_error(err: &std::io::Error) {
    eprintln!("[Error] Failed to accept connection: {err}");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}

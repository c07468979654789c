//! Core types and utilities

pub mod error;
pub mod logging;
pub mod config;

pub use error::Error;
pub use config::Config;

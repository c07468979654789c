//! Error types for the rechunk toolkit

use thiserror::Error;

/// Main error type for the toolkit
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Regeneration error: {0}")]
    Regen(String),

    #[error("Config error: {0}")]
    Config(String),
}

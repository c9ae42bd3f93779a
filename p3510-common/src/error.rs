//! Errors shared by the records and wardrobe servers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Creating the database directory or reading a config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied value rejected before reaching SQL (bad table name,
    /// missing report parameter, non-numeric threshold)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

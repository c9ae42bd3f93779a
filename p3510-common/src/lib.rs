//! # P3510 Common Library
//!
//! Shared code for the records and wardrobe applications:
//! - Error type and result alias
//! - Bootstrap configuration (command line, environment, TOML)
//! - Tracing initialization
//! - The `/health` route
//! - SQLite pool setup
//! - HTML page helpers

pub mod config;
pub mod db;
pub mod error;
pub mod health;
pub mod html;
pub mod logging;

pub use error::{Error, Result};

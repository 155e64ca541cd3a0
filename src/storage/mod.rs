//! Storage module - Configuration persistence

pub mod config;

use crate::error::ConfigError;
pub type Result<T> = std::result::Result<T, ConfigError>;

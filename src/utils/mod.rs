//! Utils module - Shared utilities and helpers

/// Warning/error output and verbose logging
pub mod logging;

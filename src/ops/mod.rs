//! Ops module - One self-contained operation module per topic
//!
//! Every module is stateless: each function owns its resources for the
//! duration of the call and shares nothing with other calls. No module
//! depends on another; composition happens only at the CLI layer.

/// Subprocess execution and the static command catalog
pub mod command;

/// JSON/CSV files and map manipulation
pub mod data;

/// Date and time helpers
pub mod datetime;

/// Batch file operations and folder archiving
pub mod file;

/// Image resize, conversion, compression, thumbnails
pub mod image;

/// Connectivity probes and URL helpers
pub mod network;

/// PDF download, merge, split, rasterization
pub mod pdf;

/// Pure string transformations
pub mod text;

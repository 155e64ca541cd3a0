//! Display module - Output formatting

pub mod table;

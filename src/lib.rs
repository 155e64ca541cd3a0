pub use error::AppError;

/// Main layers (dependency flow: CLI → Ops → Storage)
pub mod cli; // Command-line interface
pub mod ops; // Operation modules, one per topic
pub mod storage; // Configuration persistence

/// Support modules (used across layers)
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;

//! # Storage Crate
//!
//! The system's flat-file archive. Every dataset the pipeline produces or
//! consumes is a two-column CSV (`date,revenue`), and this crate is the only
//! place that knows how those files are laid out.
//!
//! ## Public API
//!
//! - `CsvRepository`: Loads and saves `RevenueSeries` values.
//! - `StorageError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StorageError;
pub use repository::CsvRepository;

//! # Core Types
//!
//! The foundational data structures shared by every crate in the workspace.
//! As a Layer 0 crate it depends on nothing local and carries no I/O.

pub mod error;
pub mod record;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use record::RevenueRecord;
pub use series::RevenueSeries;

//! # Analytics
//!
//! Descriptive statistics for a single numeric column: location and spread,
//! linearly interpolated quantiles, IQR outlier bounds and trailing means.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   dates or charts; it works on plain `f64` slices.
//! - **Missing values:** Functions that accept `Option<f64>` skip `None` (and `NaN`)
//!   the same way a spreadsheet skips blank cells.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The stateless calculator.
//! - `DescriptiveStats`, `IqrBounds`, `CentralTendency`: Its serializable outputs.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{CentralTendency, DescriptiveStats, IqrBounds};

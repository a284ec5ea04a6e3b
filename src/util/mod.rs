//! Low-level helpers shared by the filter core.
//!
//! # Modules
//!
//! - [`divisor`] - Exact remainder by a precomputed reciprocal

pub mod divisor;

pub use divisor::FastDivisor;

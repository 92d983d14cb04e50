//! edlist library crate — re-exports for integration tests.
//!
//! The primary interface is the `edlist` binary. The page model lives in
//! `edlist-core`; this crate adds the CLI output formats and telemetry.

pub mod format;
pub mod telemetry;

pub use edlist_core::*;

//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for fills, orders, positions and markets.
//! - [`snapshot`] - Writes snapshot directories in the exchange's shapes.

pub mod domain;
pub mod snapshot;

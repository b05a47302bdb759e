//! Infrastructure layer.
//!
//! Technical concerns that feed the engine without containing business
//! logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup
//! - [`snapshot`] - Decoding exchange snapshot files
pub mod config;
pub mod snapshot;

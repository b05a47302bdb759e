//! Application services.
//!
//! The state the calling layer owns between passes (snapshot cache,
//! alert ledger, monitor counters) lives here as explicit objects, along
//! with the scan pass that ties the engine together.

pub mod cache;
pub mod ledger;
pub mod monitor;
pub mod scan;

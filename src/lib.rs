//! Surebet - arbitrage detection for positions held on a sports betting exchange.
//!
//! The crate turns raw exchange records (fills, maker orders, market
//! metadata) into positions and looks for ways to lock in profit:
//!
//! - **Arbitrage** - a pending position that can be hedged on the opposite
//!   side at live odds for a guaranteed profit.
//! - **Closed surebets** - markets already covered on both sides.
//! - **Pre-match scoring** - upcoming markets ranked as entry candidates.
//!
//! # Modules
//!
//! - [`domain`] - Pure engine: normalization, aggregation, detection, scoring
//! - [`application`] - Scan pass, snapshot cache, alert ledger, monitor state
//! - [`infrastructure`] - Configuration, logging and snapshot loading
//! - [`adapter`] - The `surebet` command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use surebet::application::scan::run_scan;
//! use surebet::domain::{aggregate_positions, ArbitrageConfig};
//! use surebet::infrastructure::snapshot::SnapshotDir;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = SnapshotDir::new("snapshots").load()?;
//!     let positions = aggregate_positions(&snapshot.fills);
//!     let report = run_scan(
//!         &positions,
//!         &snapshot.books,
//!         &snapshot.markets,
//!         &ArbitrageConfig::default(),
//!     );
//!     for opp in &report.opportunities {
//!         println!("{} roi {:.2}%", opp.key(), opp.roi());
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

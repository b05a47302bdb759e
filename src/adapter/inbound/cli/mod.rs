//! CLI module graph.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod format;
pub mod hedge;
pub mod monitor;
pub mod output;
pub mod paths;
pub mod positions;
pub mod prematch;
pub mod scan;
pub mod stats;

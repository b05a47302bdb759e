//! Infrastructure configuration modules.

pub mod detection;
pub mod logging;
pub mod monitor;
pub mod settings;

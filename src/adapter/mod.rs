//! Adapters between the outside world and the engine.

pub mod inbound;

//! CLI command implementations.

pub mod capacity;
pub mod embed;
pub mod extract;
pub mod mask;
pub mod metrics;

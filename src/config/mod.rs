//! JSON runtime configuration for the `battlemap` binary.
pub mod runtime;

pub use runtime::{load_config, OutputConfig, RuntimeConfig};

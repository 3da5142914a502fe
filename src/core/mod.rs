//! Core types: spectral frames, configuration, and phase math.

pub mod config;
pub mod frame;
pub mod math;

pub use config::{read_config_json, write_config_json, EngineConfig};
pub use frame::{PolarBin, SpectralFrame};

//! Frame-by-frame spectral smoothing engines.

pub mod freeze;
mod held;
pub mod lag;
pub mod stage;

pub use freeze::FreezeEngine;
pub use lag::{LagCoefficients, LagEngine};
pub use stage::Stage;

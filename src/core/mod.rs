//! Core data structures and the fixed-step dynamics engine.
//!
//! The step loop lives in [`sim`]; [`particle`] and [`config`] define the
//! state it advances, and [`pressure`] turns accumulated wall impulse into
//! periodic readings.

pub mod config;
pub mod particle;
pub mod pressure;
pub mod sim;

pub use config::Config;
pub use particle::Particle;
pub use pressure::{PressureEstimator, PressureReading};
pub use sim::{RunLimit, RunSummary, Simulation};

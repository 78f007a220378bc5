//! Fixed-step hard-sphere gas simulation in a cubic container.
//!
//! `gasbox` advances N rigid spheres under Newtonian motion with pairwise
//! elastic collisions and specular wall reflections, and derives an emergent
//! scalar pressure from the momentum the walls absorb over a fixed window of
//! steps. Rendering and parameter entry are left to downstream consumers; the
//! crate exposes per-step position snapshots and periodic
//! [`PressureReading`]s instead.
//!
//! ```no_run
//! use gasbox::{Config, RunLimit, Simulation};
//!
//! # fn main() -> gasbox::error::Result<()> {
//! let config = Config::helium(300.0, 50, 0.5e-13);
//! let mut sim = Simulation::new(&config, Some(42))?;
//! sim.run(RunLimit::Steps(10_000), None, |_particles, reading| {
//!     if let Some(r) = reading {
//!         println!("t = {:.3e} s: {:.3e} Pa", r.time, r.pressure);
//!     }
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;

pub use crate::core::{Config, Particle, PressureReading, RunLimit, RunSummary, Simulation};
pub use crate::error::{Error, Result};

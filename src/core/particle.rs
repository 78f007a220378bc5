use crate::error::{Error, Result};

/// Fixed spatial dimension (3D).
pub const DIM: usize = 3;

/// A rigid spherical gas particle in D=3.
///
/// Fields:
/// - `id`: stable identifier (array index at creation, never reassigned)
/// - `r`: position vector [x, y, z]
/// - `v`: velocity vector [vx, vy, vz]
/// - `radius`: sphere radius (> 0, immutable after creation)
/// - `mass`: particle mass (> 0, immutable after creation)
///
/// Position and velocity are mutated only by the integration, collision, and
/// wall-reflection phases of the step loop. Particles are never created or
/// destroyed after `Simulation::new`.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Stable particle identifier.
    pub id: u32,
    /// Position (x, y, z), relative to the container center.
    pub r: [f64; DIM],
    /// Velocity (vx, vy, vz).
    pub v: [f64; DIM],
    /// Sphere radius (> 0).
    radius: f64,
    /// Mass (> 0).
    mass: f64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidConfig` if `radius` or `mass` is non-positive or any
    ///   component is NaN/inf.
    pub fn new(id: u32, r: [f64; DIM], v: [f64; DIM], radius: f64, mass: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidConfig("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidConfig("mass must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidConfig("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidConfig("velocity must be finite".into()));
        }
        Ok(Self {
            id,
            r,
            v,
            radius,
            mass,
        })
    }

    /// Sphere radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Particle mass.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * self.mass * vsq
    }
}

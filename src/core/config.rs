use crate::error::{Error, Result};

/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.38e-23;

/// Avogadro's number, 1/mol (reference-configuration rounding).
pub const AVOGADRO: f64 = 6e23;

/// Reference molar volume used to size the container, m^3/mol.
pub const MOLAR_VOLUME: f64 = 24.2e-3;

/// Helium atomic mass, kg.
pub const HELIUM_MASS: f64 = 4e-3 / AVOGADRO;

/// Helium atomic radius, m.
pub const HELIUM_RADIUS: f64 = 310e-12;

/// Shrink factor applied to the molar-volume-derived box edge. The container
/// half-extent is `(MOLAR_VOLUME / AVOGADRO * N)^(1/3) / CONTAINER_SHRINK`,
/// which packs the gas far denser than ambient conditions so that collisions
/// are frequent at small N.
const CONTAINER_SHRINK: f64 = 22.0;

/// Default pressure-estimator window, in steps.
pub const DEFAULT_PRESSURE_WINDOW: u32 = 1000;

/// Construction-time parameters for a [`Simulation`](crate::core::Simulation).
///
/// The container half-extent `L` is not a free parameter: it is derived once
/// from the particle count and the reference molar volume, the way the modeled
/// species fixes it. Wall contact is tested against the effective bound
/// `L_eff = L - radius` so that sphere surfaces, not centers, touch the walls.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gas temperature, Kelvin (> 0). Sets the initial speed of every
    /// particle to `v_rms = sqrt(3 k T / m)`.
    pub temperature: f64,
    /// Number of particles (>= 2).
    pub num_particles: usize,
    /// Fixed integration time step, seconds (> 0). Must be small relative to
    /// the mean free time; each pair resolves at most one contact per step.
    pub dt: f64,
    /// Particle mass, kg (> 0, uniform across the population).
    pub mass: f64,
    /// Particle radius, m (> 0, uniform across the population).
    pub radius: f64,
    /// Pressure-estimator window, in steps (>= 1).
    pub pressure_window: u32,
}

impl Config {
    /// Configuration for helium gas at the given temperature, matching the
    /// reference species constants.
    pub fn helium(temperature: f64, num_particles: usize, dt: f64) -> Self {
        Self {
            temperature,
            num_particles,
            dt,
            mass: HELIUM_MASS,
            radius: HELIUM_RADIUS,
            pressure_window: DEFAULT_PRESSURE_WINDOW,
        }
    }

    /// Validate all parameters, including that the derived container is large
    /// enough to hold a particle center strictly inside it.
    pub fn validate(&self) -> Result<()> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(Error::InvalidConfig(
                "temperature must be finite and > 0".into(),
            ));
        }
        if self.num_particles < 2 {
            return Err(Error::InvalidConfig("num_particles must be >= 2".into()));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidConfig("dt must be finite and > 0".into()));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidConfig("mass must be finite and > 0".into()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig("radius must be finite and > 0".into()));
        }
        if self.pressure_window == 0 {
            return Err(Error::InvalidConfig("pressure_window must be >= 1".into()));
        }
        if self.effective_bound() <= 0.0 {
            return Err(Error::InvalidConfig(
                "container half-extent must exceed the particle radius".into(),
            ));
        }
        Ok(())
    }

    /// Container half-extent `L` derived from the particle count and the
    /// reference molar volume.
    pub fn half_extent(&self) -> f64 {
        ((MOLAR_VOLUME / AVOGADRO) * self.num_particles as f64).powf(1.0 / 3.0) / CONTAINER_SHRINK
    }

    /// Effective bound `L_eff = L - radius` against which particle centers
    /// are tested for wall contact.
    pub fn effective_bound(&self) -> f64 {
        self.half_extent() - self.radius
    }

    /// Root-mean-square speed `sqrt(3 k T / m)` for the configured species.
    pub fn v_rms(&self) -> f64 {
        (3.0 * BOLTZMANN * self.temperature / self.mass).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helium_config_is_valid() {
        let cfg = Config::helium(300.0, 50, 0.5e-13);
        cfg.validate().expect("reference configuration must validate");
    }

    #[test]
    fn half_extent_matches_reference_formula() {
        let cfg = Config::helium(300.0, 50, 0.5e-13);
        let expected = ((24.2e-3 / 6e23) * 50.0_f64).powf(1.0 / 3.0) / 22.0;
        assert!((cfg.half_extent() - expected).abs() < 1e-18);
        assert!(cfg.effective_bound() > 0.0);
        assert!(cfg.effective_bound() < cfg.half_extent());
    }

    #[test]
    fn v_rms_matches_kinetic_theory() {
        let cfg = Config::helium(300.0, 50, 0.5e-13);
        let expected = (3.0_f64 * 1.38e-23 * 300.0 / (4e-3 / 6e23)).sqrt();
        assert!((cfg.v_rms() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn degenerate_configs_rejected() {
        let base = Config::helium(300.0, 50, 0.5e-13);

        let mut cfg = base.clone();
        cfg.temperature = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.num_particles = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.dt = -1e-13;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.mass = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.pressure_window = 0;
        assert!(cfg.validate().is_err());

        // Radius so large the effective bound collapses.
        let mut cfg = base;
        cfg.radius = 1.0;
        assert!(cfg.validate().is_err());
    }
}

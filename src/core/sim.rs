use crate::core::particle::DIM;
use crate::core::{Config, Particle, PressureEstimator, PressureReading};
use crate::error::{Error, Result};
use log::{debug, trace};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};

/// Termination condition for [`Simulation::run`].
#[derive(Debug, Clone, Copy)]
pub enum RunLimit {
    /// Execute exactly this many steps.
    Steps(u64),
    /// Step until simulated time reaches this target (absolute, seconds).
    SimTime(f64),
}

/// Outcome of a [`Simulation::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps actually executed.
    pub steps: u64,
    /// True when the loop exited on the cancellation flag rather than the
    /// limit.
    pub cancelled: bool,
}

/// Fixed-step hard-sphere gas simulation in a cubic container.
///
/// The container is an axis-aligned cube of half-extent `L` centered on the
/// origin; particle centers are confined to `[-L_eff, L_eff]^3` with
/// `L_eff = L - radius`, so sphere surfaces meet the walls. Each tick runs
/// four phases in strict sequence over the shared particle array:
///
/// 1. integrate: `r += v * dt` for every particle;
/// 2. resolve pairwise collisions: elastic impulse exchange for every
///    contacting, approaching pair (i < j), in pair order;
/// 3. reflect walls: per-axis specular reflection at the effective bound,
///    accumulating `2 m |v|` of impulse per event;
/// 4. every `pressure_window` steps, convert the accumulated impulse into a
///    pressure reading and zero the accumulator.
///
/// Positions are never clamped back inside the container; a particle that
/// overshoots a wall can transiently sit outside the bound by up to
/// `|v| * dt` before the reflected velocity carries it back in.
#[derive(Debug)]
pub struct Simulation {
    time_now: f64,
    dt: f64,
    steps_done: u64,
    half_extent: f64,
    bound: f64,
    pub particles: Vec<Particle>,
    estimator: PressureEstimator,
}

impl Simulation {
    /// Create a simulation from a validated configuration.
    ///
    /// Particles are seeded at independent uniform-random positions in
    /// `[-L_eff, L_eff]^3` with no overlap avoidance (the resolver only ever
    /// adjusts velocities, so initial overlaps disperse on their own), and
    /// isotropic velocities of magnitude `v_rms = sqrt(3 k T / m)` sampled
    /// via two uniform angles. Pass a `seed` for reproducible runs.
    pub fn new(config: &Config, seed: Option<u64>) -> Result<Self> {
        config.validate()?;

        let half_extent = config.half_extent();
        let bound = config.effective_bound();
        let v_rms = config.v_rms();

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let mut particles = Vec::with_capacity(config.num_particles);
        for id in 0..(config.num_particles as u32) {
            let mut r = [0.0_f64; DIM];
            for r_k in &mut r {
                *r_k = rng.random_range(-bound..=bound);
            }

            // Isotropic direction from polar angle a and azimuth b.
            let a = rng.random_range(0.0..PI);
            let b = rng.random_range(0.0..(2.0 * PI));
            let v = [
                v_rms * a.sin() * b.cos(),
                v_rms * a.sin() * b.sin(),
                v_rms * a.cos(),
            ];

            particles.push(Particle::new(id, r, v, config.radius, config.mass)?);
        }

        debug!(
            "seeded {} particles: L={:.3e} m, L_eff={:.3e} m, v_rms={:.3e} m/s, dt={:.3e} s",
            particles.len(),
            half_extent,
            bound,
            v_rms,
            config.dt
        );

        Ok(Self {
            time_now: 0.0,
            dt: config.dt,
            steps_done: 0,
            half_extent,
            bound,
            particles,
            estimator: PressureEstimator::new(config.pressure_window, half_extent, config.dt),
        })
    }

    /// Current simulated time, seconds.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// Fixed step size, seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Steps executed since construction.
    pub fn step_count(&self) -> u64 {
        self.steps_done
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Container half-extent `L`, meters.
    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    /// Effective bound `L_eff = L - radius` for particle centers, meters.
    pub fn effective_bound(&self) -> f64 {
        self.bound
    }

    /// Positions as a Vec of fixed-size arrays (render snapshot).
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.v).collect()
    }

    /// Total kinetic energy (diagnostic). Exactly conserved by elastic
    /// collisions and specular reflections, up to floating-point rounding.
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Kinetic temperature from mean kinetic energy per particle,
    /// `T = 2 <E> / (3 k)`. Equals the configured temperature exactly at
    /// seeding, since every particle starts at `v_rms`.
    pub fn temperature(&self) -> f64 {
        let mean_ke = self.kinetic_energy() / self.particles.len() as f64;
        2.0 * mean_ke / (3.0 * crate::core::config::BOLTZMANN)
    }

    /// Wall impulse accumulated since the last pressure reading (diagnostic).
    pub fn accumulated_impulse(&self) -> f64 {
        self.estimator.accumulated_impulse()
    }

    /// Execute one fixed time step. Returns a pressure reading when this step
    /// closes an estimator window.
    pub fn step(&mut self) -> Option<PressureReading> {
        self.time_now += self.dt;
        self.steps_done += 1;

        self.integrate();
        self.resolve_collisions();
        self.reflect_walls();

        let reading = self.estimator.finish_step(self.time_now);
        if let Some(r) = &reading {
            trace!("t={:.6e} s: pressure {:.6e} Pa", r.time, r.pressure);
        }
        reading
    }

    /// Execute `n` steps, collecting any pressure readings emitted.
    pub fn advance_steps(&mut self, n: u64) -> Vec<PressureReading> {
        let mut readings = Vec::new();
        for _ in 0..n {
            if let Some(r) = self.step() {
                readings.push(r);
            }
        }
        readings
    }

    /// Step until simulated time reaches `target_time` (within half a step),
    /// collecting any pressure readings emitted.
    pub fn advance_to(&mut self, target_time: f64) -> Result<Vec<PressureReading>> {
        if !target_time.is_finite() {
            return Err(Error::InvalidParam("target_time must be finite".into()));
        }
        if target_time < self.time_now {
            return Err(Error::InvalidParam(
                "target_time cannot be earlier than current time".into(),
            ));
        }
        let mut readings = Vec::new();
        while self.time_now < target_time - 0.5 * self.dt {
            if let Some(r) = self.step() {
                readings.push(r);
            }
        }
        Ok(readings)
    }

    /// Run the step loop until `limit` is reached, invoking `on_tick` after
    /// every step with the particle array and any pressure reading emitted on
    /// that step. An optional cancellation flag is checked once per tick
    /// boundary; setting it stops the loop cooperatively.
    pub fn run<F>(
        &mut self,
        limit: RunLimit,
        cancel: Option<&AtomicBool>,
        mut on_tick: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&[Particle], Option<&PressureReading>),
    {
        if let RunLimit::SimTime(t) = limit {
            if !t.is_finite() {
                return Err(Error::InvalidParam("time limit must be finite".into()));
            }
            if t < self.time_now {
                return Err(Error::InvalidParam(
                    "time limit cannot be earlier than current time".into(),
                ));
            }
        }

        let mut steps = 0u64;
        loop {
            let done = match limit {
                RunLimit::Steps(n) => steps >= n,
                RunLimit::SimTime(t) => self.time_now >= t - 0.5 * self.dt,
            };
            if done {
                break;
            }
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!("run cancelled after {} steps", steps);
                    return Ok(RunSummary {
                        steps,
                        cancelled: true,
                    });
                }
            }
            let reading = self.step();
            steps += 1;
            on_tick(&self.particles, reading.as_ref());
        }
        Ok(RunSummary {
            steps,
            cancelled: false,
        })
    }

    // ============ Step phases ============

    /// Phase 1: advance every position by `v * dt`. Runs to completion over
    /// the whole array before any collision is evaluated.
    pub(crate) fn integrate(&mut self) {
        for p in &mut self.particles {
            for k in 0..DIM {
                p.r[k] += p.v[k] * self.dt;
            }
        }
    }

    /// Phase 2: resolve every contacting, approaching pair (i < j) with the
    /// closed-form two-body elastic impulse exchange. Pairs are evaluated
    /// once each, independently and in order; simultaneous multi-way
    /// contacts resolve sequentially, acceptable while `dt` keeps them rare.
    pub(crate) fn resolve_collisions(&mut self) {
        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                self.resolve_pair(i, j);
            }
        }
    }

    /// Resolve one pair: no-op unless the spheres overlap and are closing.
    fn resolve_pair(&mut self, i: usize, j: usize) {
        let (pi, pj) = (&self.particles[i], &self.particles[j]);

        // d = r_i - r_j, u = v_i - v_j, both from the pre-collision snapshot.
        let mut d = [0.0_f64; DIM];
        let mut u = [0.0_f64; DIM];
        for k in 0..DIM {
            d[k] = pi.r[k] - pj.r[k];
            u[k] = pi.v[k] - pj.v[k];
        }

        let dist_sq = dot(&d, &d);
        let r_sum = pi.radius() + pj.radius();
        if dist_sq >= r_sum * r_sum {
            return; // not in contact
        }
        let closing = dot(&u, &d);
        if closing >= 0.0 {
            return; // touching but separating; re-colliding would pump energy in
        }
        if dist_sq == 0.0 {
            return; // coincident centers, contact normal undefined; skip this step
        }

        // v_i' = v_i - (2 m_j / (m_i + m_j)) d (u.d) / |d|^2, and symmetric
        // for j. Only the component along the line of centers changes.
        let (mi, mj) = (pi.mass(), pj.mass());
        let scale = 2.0 * closing / ((mi + mj) * dist_sq);
        for k in 0..DIM {
            self.particles[i].v[k] -= mj * scale * d[k];
            self.particles[j].v[k] += mi * scale * d[k];
        }
    }

    /// Phase 3: per-axis specular reflection at the effective bound. Axes are
    /// independent, so a corner contact reflects (and accrues impulse on)
    /// each violated axis. Positions are left where they are; only the
    /// velocity flips.
    pub(crate) fn reflect_walls(&mut self) {
        let Self {
            particles,
            estimator,
            bound,
            ..
        } = self;
        for p in particles {
            for k in 0..DIM {
                if p.r[k].abs() >= *bound {
                    p.v[k] = -p.v[k];
                    estimator.record_impulse(2.0 * p.mass() * p.v[k].abs());
                }
            }
        }
    }
}

#[inline]
fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// A windowed pressure estimate emitted every `W` steps.
///
/// Meaningful only as an average over the just-elapsed window; the core keeps
/// no history of past readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureReading {
    /// Simulation time at the end of the window, seconds.
    pub time: f64,
    /// Windowed mechanical pressure, Pa.
    pub pressure: f64,
}

/// Converts accumulated wall impulse into periodic pressure readings.
///
/// The estimator owns the impulse accumulator: the wall-reflection phase
/// records every event's momentum transfer here, and every `window` steps the
/// total is divided by (total wall area x window duration) and the
/// accumulator is zeroed. The reading is the mean normal force per unit area
/// exerted on the six faces over the window.
#[derive(Debug)]
pub struct PressureEstimator {
    /// Window length in steps.
    window: u32,
    /// Total wall area, `6 * (2L)^2`.
    wall_area: f64,
    /// Fixed step duration, seconds.
    dt: f64,
    /// Steps completed since the last reading.
    steps_in_window: u32,
    /// Momentum transferred to the walls since the last reading.
    impulse: f64,
}

impl PressureEstimator {
    /// Create an estimator for a cubic container of half-extent `half_extent`.
    ///
    /// `window` and `dt` are assumed already validated by `Config::validate`.
    pub fn new(window: u32, half_extent: f64, dt: f64) -> Self {
        let edge = 2.0 * half_extent;
        Self {
            window,
            wall_area: 6.0 * edge * edge,
            dt,
            steps_in_window: 0,
            impulse: 0.0,
        }
    }

    /// Record the momentum transferred by one wall-reflection event.
    #[inline]
    pub fn record_impulse(&mut self, impulse: f64) {
        self.impulse += impulse;
    }

    /// Impulse accumulated since the last reading (diagnostic).
    #[inline]
    pub fn accumulated_impulse(&self) -> f64 {
        self.impulse
    }

    /// Mark one simulation step complete. Returns a reading and resets the
    /// accumulator when the window closes, `None` otherwise.
    pub fn finish_step(&mut self, time: f64) -> Option<PressureReading> {
        self.steps_in_window += 1;
        if self.steps_in_window < self.window {
            return None;
        }
        let window_duration = self.window as f64 * self.dt;
        let pressure = self.impulse / (self.wall_area * window_duration);
        self.impulse = 0.0;
        self.steps_in_window = 0;
        Some(PressureReading { time, pressure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_matches_formula_exactly() {
        let half_extent = 2.0;
        let dt = 0.25;
        let window = 8;
        let mut est = PressureEstimator::new(window, half_extent, dt);

        est.record_impulse(3.5);
        est.record_impulse(1.5);
        assert_eq!(est.accumulated_impulse(), 5.0);

        for step in 1..window {
            assert!(est.finish_step(step as f64 * dt).is_none());
        }
        let reading = est
            .finish_step(window as f64 * dt)
            .expect("window must close on the Wth step");

        // impulse / (6 * (2L)^2 * W * dt)
        let expected = 5.0 / (6.0 * 4.0 * 4.0 * 8.0 * 0.25);
        assert_eq!(reading.pressure, expected);
        assert_eq!(reading.time, window as f64 * dt);
    }

    #[test]
    fn accumulator_resets_after_reading() {
        let mut est = PressureEstimator::new(2, 1.0, 0.1);
        est.record_impulse(7.0);
        assert!(est.finish_step(0.1).is_none());
        assert!(est.finish_step(0.2).is_some());
        assert_eq!(est.accumulated_impulse(), 0.0);

        // Next window starts clean and spans W steps again.
        assert!(est.finish_step(0.3).is_none());
        let reading = est.finish_step(0.4).expect("second window must close");
        assert_eq!(reading.pressure, 0.0);
    }

    #[test]
    fn impulse_sums_event_contributions() {
        let mut est = PressureEstimator::new(100, 1.0, 0.1);
        let events = [0.5, 0.25, 1.25, 2.0];
        for &j in &events {
            est.record_impulse(j);
        }
        let total: f64 = events.iter().sum();
        assert!((est.accumulated_impulse() - total).abs() < 1e-15);
    }
}

//! Fixed-step clock decoupling physics cadence from render frame rate
//!
//! Variable frame time is accumulated and drained in whole fixed steps
//! before each render, so physics integration sees a constant `dt` no
//! matter how fast or slow frames arrive.

/// Default physics step, 120 Hz
pub const FIXED_DT: f32 = 1.0 / 120.0;

/// Accumulates elapsed wall time and hands out whole fixed steps
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f32,
    accumulator: f32,
    max_debt: f32,
}

impl FixedStepClock {
    /// Create a clock with the given step size in seconds.
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            // A stalled frame repays at most this much simulated time,
            // otherwise one hitch would trigger a catch-up spiral.
            max_debt: step * 8.0,
        }
    }

    /// Add a frame's elapsed wall time to the accumulator.
    pub fn advance(&mut self, frame_dt: f32) {
        self.accumulator = (self.accumulator + frame_dt).min(self.max_debt);
    }

    /// Consume one fixed step if a whole one is available. Call in a loop
    /// until it returns `false`, then render.
    pub fn tick(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// The fixed step size in seconds
    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(FIXED_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut FixedStepClock) -> usize {
        let mut n = 0;
        while clock.tick() {
            n += 1;
        }
        n
    }

    #[test]
    fn short_frame_yields_no_step() {
        let mut clock = FixedStepClock::new(0.01);
        clock.advance(0.004);
        assert_eq!(drain(&mut clock), 0);
    }

    #[test]
    fn whole_steps_are_drained_and_remainder_kept() {
        let mut clock = FixedStepClock::new(0.01);
        clock.advance(0.025);
        assert_eq!(drain(&mut clock), 2);
        // The leftover 0.005 carries into the next frame
        clock.advance(0.005);
        assert_eq!(drain(&mut clock), 1);
    }

    #[test]
    fn stall_debt_is_capped() {
        let mut clock = FixedStepClock::new(0.01);
        clock.advance(60.0);
        assert!(drain(&mut clock) <= 8);
    }
}

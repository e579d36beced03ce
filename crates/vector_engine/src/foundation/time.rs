//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Smallest accepted fixed step (seconds)
pub const MIN_FIXED_STEP: f32 = 1.0e-4;

/// Fixed-step accumulator
///
/// Wall-clock frame time is accumulated and drained in `step` sized
/// chunks, capped at `max_steps` per call so a long stall cannot spiral.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Create an accumulator with the given step size (seconds)
    ///
    /// Steps below `MIN_FIXED_STEP`, or NaN, are raised to it.
    pub fn new(step: f32, max_steps: u32) -> Self {
        if step.is_nan() || step < MIN_FIXED_STEP {
            log::warn!("Fixed step {} is too small, using {}", step, MIN_FIXED_STEP);
        }
        Self {
            step: step.max(MIN_FIXED_STEP),
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Step size in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time carried over to the next frame
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    /// Add elapsed time and return how many fixed steps to run now
    ///
    /// Time beyond `max_steps` steps is discarded.
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.step {
            log::debug!(
                "Dropping {:.4}s of simulation time after {} steps",
                self.accumulator,
                steps
            );
            self.accumulator %= self.step;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= timer.delta_time());
    }

    #[test]
    fn test_fixed_timestep_carries_remainder() {
        let mut fixed = FixedTimestep::new(0.1, 10);
        assert_eq!(fixed.accumulate(0.25), 2);
        assert_relative_eq!(fixed.accumulated(), 0.05, epsilon = 1e-5);
        assert_eq!(fixed.accumulate(0.06), 1);
    }

    #[test]
    fn test_fixed_timestep_caps_steps() {
        let mut fixed = FixedTimestep::new(0.1, 3);
        assert_eq!(fixed.accumulate(1.0), 3);
        assert!(fixed.accumulated() < 0.1);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut fixed = FixedTimestep::new(0.1, 3);
        assert_eq!(fixed.accumulate(-1.0), 0);
        assert_relative_eq!(fixed.accumulated(), 0.0);
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let mut fixed = FixedTimestep::new(0.0, 3);
        assert_relative_eq!(fixed.step(), MIN_FIXED_STEP);
        assert_eq!(fixed.accumulate(0.5), 3);
        assert!(fixed.accumulated().is_finite());
        assert_eq!(fixed.accumulate(0.5), 3);

        assert_relative_eq!(FixedTimestep::new(f32::NAN, 1).step(), MIN_FIXED_STEP);
    }
}

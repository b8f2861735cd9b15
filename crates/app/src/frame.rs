/// Upper bound on the simulation step handed to the update hook.
pub const MAX_STEP_SECONDS: f64 = 1.0 / 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameState {
    AwaitingFirstFrame,
    /// `previous` is the timestamp of the last frame, in milliseconds.
    Running { previous: f64 },
}

/// What one frame callback measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Raw time since the previous frame in milliseconds; 0 on the first frame.
    pub elapsed_ms: f64,
    /// Clamped step in seconds fed to the update hook.
    pub step_seconds: f64,
    /// The first frame only records the baseline; no update runs.
    pub first: bool,
}

/// Tracks frame timestamps and derives the clamped step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    state: FrameState,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            state: FrameState::AwaitingFirstFrame,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Record a frame at `timestamp_ms` and return the step since the last one.
    pub fn advance(&mut self, timestamp_ms: f64) -> FrameStep {
        let step = match self.state {
            FrameState::AwaitingFirstFrame => FrameStep {
                elapsed_ms: 0.0,
                step_seconds: 0.0,
                first: true,
            },
            FrameState::Running { previous } => {
                let elapsed_ms = timestamp_ms - previous;
                FrameStep {
                    elapsed_ms,
                    step_seconds: clamp_step(elapsed_ms),
                    first: false,
                }
            }
        };
        self.state = FrameState::Running {
            previous: timestamp_ms,
        };
        step
    }
}

/// `min(1/30, max(0, elapsed_ms / 1000))`.
pub fn clamp_step(elapsed_ms: f64) -> f64 {
    (elapsed_ms * 0.001).clamp(0.0, MAX_STEP_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_records_baseline_only() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.state(), FrameState::AwaitingFirstFrame);
        let step = clock.advance(1234.5);
        assert!(step.first);
        assert_eq!(step.elapsed_ms, 0.0);
        assert_eq!(step.step_seconds, 0.0);
        assert_eq!(clock.state(), FrameState::Running { previous: 1234.5 });
    }

    #[test]
    fn short_frames_pass_through() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        let step = clock.advance(1016.0);
        assert!(!step.first);
        assert_eq!(step.elapsed_ms, 16.0);
        assert!((step.step_seconds - 0.016).abs() < 1e-12);
    }

    #[test]
    fn long_pause_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let step = clock.advance(5000.0);
        assert_eq!(step.elapsed_ms, 5000.0);
        assert_eq!(step.step_seconds, MAX_STEP_SECONDS);
    }

    #[test]
    fn backwards_timestamp_is_not_negative() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        let step = clock.advance(90.0);
        assert_eq!(step.step_seconds, 0.0);
        assert_eq!(clock.state(), FrameState::Running { previous: 90.0 });
    }

    #[test]
    fn step_matches_formula_across_intervals() {
        let mut clock = FrameClock::new();
        let mut t = 0.0;
        clock.advance(t);
        for dt in [0.0, 1.0, 16.7, 33.0, 33.4, 34.0, 250.0] {
            t += dt;
            let step = clock.advance(t);
            let expected = (1.0f64 / 30.0).min((dt) / 1000.0);
            assert!((step.step_seconds - expected).abs() < 1e-9, "dt {dt}");
            assert!(step.step_seconds >= 0.0);
        }
    }
}

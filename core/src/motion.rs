//! Motion-sample timing.
//!
//! Motion-blurred objects carry one snapshot per shutter time. A ray at
//! `frame_time` uses a single snapshot when it falls outside the sampled
//! range (or there is only one sample), otherwise it interpolates between
//! the two snapshots bracketing it:
//!
//! ```text
//! sample: 0             1             2             3
//!   step: |......0......|......1......|......2......|
//! ```

/// Which motion sample(s) to use for a given time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionStep {
    /// Use sample `index` as-is.
    Sample(usize),
    /// Interpolate from sample `step` to `step + 1` by `t` in `[0, 1)`.
    Interpolate {
        /// Index of the earlier sample.
        step: usize,
        /// Offset within the step.
        t: f64,
    },
}

impl MotionStep {
    /// Index of the earlier (or only) sample.
    pub fn step(self) -> usize {
        match self {
            Self::Sample(index) => index,
            Self::Interpolate { step, .. } => step,
        }
    }
}

/// Finds the motion step `frame_time` falls inside.
///
/// `times` must be sorted ascending. Times before the first sample clamp to
/// the first sample, times at or past the last clamp to the last sample.
pub fn motion_step(times: &[f64], frame_time: f64) -> MotionStep {
    debug_assert!(!times.is_empty(), "motion_step called with no motion times");
    if times.len() <= 1 || frame_time <= times[0] {
        return MotionStep::Sample(0);
    }

    for (step, pair) in times.windows(2).enumerate() {
        if frame_time < pair[1] {
            let t = (frame_time - pair[0]) / (pair[1] - pair[0]);
            return MotionStep::Interpolate { step, t };
        }
    }

    MotionStep::Sample(times.len() - 1)
}

//! Expansion of box-style breathing patterns into phase lists.

use serde::{Deserialize, Serialize};

use crate::{AnimationConfig, CountRange, HeightRange, PhaseDuration, PhaseKind, PhaseSpec};

const BOTTOM: f64 = 1.0;
const TOP: f64 = 0.0;

/// Inhale, hold, exhale, hold cycle repeated a fixed number of times.
///
/// Durations are in seconds. Steps with a zero duration are skipped. The
/// expanded timeline never loops: every repetition is unrolled into its own
/// phases, optionally followed by a counted retention phase.
///
/// Inhale and exhale always travel the full canvas and show no numeral; only
/// the holds count down. Several patterns play back to back through
/// [`AnimationConfig::with_patterns`]. Retention ends with the wave at the
/// top, so only the last pattern of a sequence may carry one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreathingPattern {
    /// Seconds spent drawing the wave from the bottom to the top.
    pub inhale: f64,
    /// Seconds held at the top after inhaling.
    #[serde(default)]
    pub first_hold: f64,
    /// Seconds spent returning the wave to the bottom.
    pub exhale: f64,
    /// Seconds held at the bottom after exhaling.
    #[serde(default)]
    pub second_hold: f64,
    /// Number of cycles to unroll.
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
    /// Length of the final counted retention in whole seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention: Option<u32>,
}

fn default_repetitions() -> u32 {
    1
}

impl BreathingPattern {
    /// Creates a single-cycle pattern without retention.
    #[must_use]
    pub const fn new(inhale: f64, first_hold: f64, exhale: f64, second_hold: f64) -> Self {
        Self {
            inhale,
            first_hold,
            exhale,
            second_hold,
            repetitions: 1,
            retention: None,
        }
    }

    /// Four seconds for every step.
    #[must_use]
    pub const fn box_breathing() -> Self {
        Self::new(4.0, 4.0, 4.0, 4.0)
    }

    /// Overrides the number of unrolled cycles.
    #[must_use]
    pub const fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Appends a counted retention of `seconds` after the last cycle.
    #[must_use]
    pub const fn with_retention(mut self, seconds: u32) -> Self {
        self.retention = Some(seconds);
        self
    }

    /// Expands the pattern into an ordered phase list.
    #[must_use]
    pub fn phases(&self) -> Vec<PhaseSpec> {
        let cycle = [
            (self.inhale, Step::Move(PhaseKind::Rise, BOTTOM, TOP)),
            (self.first_hold, Step::Hold(TOP)),
            (self.exhale, Step::Move(PhaseKind::Fall, TOP, BOTTOM)),
            (self.second_hold, Step::Hold(BOTTOM)),
        ];

        let mut phases = Vec::new();
        for _ in 0..self.repetitions {
            for (seconds, step) in cycle {
                if seconds > 0.0 {
                    phases.push(step.into_phase(seconds));
                }
            }
        }

        if let Some(seconds) = self.retention.filter(|seconds| *seconds > 0) {
            phases.push(
                PhaseSpec::new(
                    PhaseKind::HoldCountUp,
                    PhaseDuration::FromCount,
                    HeightRange::new(BOTTOM, TOP),
                )
                .with_count(CountRange::new(1, seconds)),
            );
        }

        phases
    }

    /// Wraps the expanded phases in a default-styled configuration.
    #[must_use]
    pub fn into_config(self) -> AnimationConfig {
        AnimationConfig::with_phases(self.phases())
    }
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Move(PhaseKind, f64, f64),
    Hold(f64),
}

impl Step {
    fn into_phase(self, seconds: f64) -> PhaseSpec {
        match self {
            Self::Move(kind, from, to) => PhaseSpec::new(
                kind,
                PhaseDuration::Seconds(seconds),
                HeightRange::new(from, to),
            ),
            Self::Hold(at) => {
                let numerals = seconds.ceil() as u32;
                PhaseSpec::new(
                    PhaseKind::HoldCountDown,
                    PhaseDuration::Seconds(seconds),
                    HeightRange::new(at, at),
                )
                .with_count(CountRange::new(numerals.max(1), 1))
            }
        }
    }
}

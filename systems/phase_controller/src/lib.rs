#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wall-clock phase controller for the Breathwave animation.
//!
//! The controller converts monotonic timestamps supplied by the host into a
//! non-looping progression through the configured phase list. Phase timing is
//! derived from elapsed wall-clock time only, so the number of frames rendered
//! in between two calls never changes when a phase ends.

use std::time::Duration;

use breathwave_core::{DisplayCount, FrameOutput, PhaseKind, PhaseSpec, ValidatedConfig};

/// Mutable progress through the phase list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PhaseControllerState {
    current_phase_index: usize,
    phase_start: Duration,
}

impl PhaseControllerState {
    /// Index of the active phase.
    #[must_use]
    pub const fn current_phase_index(&self) -> usize {
        self.current_phase_index
    }

    /// Timestamp at which the active phase began.
    #[must_use]
    pub const fn phase_start(&self) -> Duration {
        self.phase_start
    }
}

/// Pure state machine that owns the active phase and its start timestamp.
#[derive(Debug)]
pub struct PhaseController {
    config: ValidatedConfig,
    state: PhaseControllerState,
}

impl PhaseController {
    /// Starts the first phase at `now`.
    #[must_use]
    pub fn new(config: ValidatedConfig, now: Duration) -> Self {
        Self {
            config,
            state: PhaseControllerState {
                current_phase_index: 0,
                phase_start: now,
            },
        }
    }

    /// Snapshot of the controller's mutable state.
    #[must_use]
    pub const fn state(&self) -> PhaseControllerState {
        self.state
    }

    /// Returns `true` once the last phase has run its full duration at `now`.
    #[must_use]
    pub fn is_complete(&self, now: Duration) -> bool {
        let index = self.state.current_phase_index;
        index + 1 == self.config.phases().len()
            && self.elapsed_seconds(now) >= self.config.phase_duration(index)
    }

    /// Produces the frame output for `now`, moving to the next phase when the
    /// active one has run its course.
    ///
    /// At most one transition happens per call. The frame that triggers a
    /// transition reports the finished phase at its exact end height, and the
    /// next phase is timed from `now`.
    pub fn advance(&mut self, now: Duration) -> FrameOutput {
        let index = self.state.current_phase_index;
        let elapsed = self.elapsed_seconds(now);
        let output = self.sample(index, elapsed);

        let last_index = self.config.phases().len() - 1;
        if index < last_index && elapsed >= self.config.phase_duration(index) {
            self.state.current_phase_index = index + 1;
            self.state.phase_start = now;

            let next = &self.config.phases()[index + 1];
            log::info!(
                "phase {index} ({}) complete after {elapsed:.3}s; entering phase {} ({})",
                output.active_phase_kind,
                index + 1,
                next.kind
            );
        }

        output
    }

    fn elapsed_seconds(&self, now: Duration) -> f64 {
        now.saturating_sub(self.state.phase_start).as_secs_f64()
    }

    fn sample(&self, index: usize, elapsed: f64) -> FrameOutput {
        let phase = &self.config.phases()[index];
        let duration = self.config.phase_duration(index);
        let progress = (elapsed / duration).clamp(0.0, 1.0);

        // Interpolation at progress 1 can miss the end fraction by an ulp.
        let fraction = if progress >= 1.0 {
            phase.height.end
        } else {
            phase.height.at(progress)
        };
        let canvas_height = f64::from(self.config.canvas().height);

        FrameOutput {
            wave_height_pixels: (fraction * canvas_height).clamp(0.0, canvas_height),
            display_count: display_count(phase, elapsed),
            active_phase_kind: phase.kind,
            phase_index: index,
            progress,
        }
    }
}

/// Numeral shown by `phase` after `elapsed` seconds, if it counts at all.
fn display_count(phase: &PhaseSpec, elapsed: f64) -> Option<DisplayCount> {
    let range = phase.count?;
    let whole_seconds = elapsed.max(0.0).floor() as u32;
    let value = match phase.kind {
        PhaseKind::HoldCountUp => range.start.saturating_add(whole_seconds).min(range.end),
        PhaseKind::HoldCountDown => range.start.saturating_sub(whole_seconds).max(range.end),
        PhaseKind::Rise | PhaseKind::Fall => return None,
    };
    Some(DisplayCount { value, range })
}

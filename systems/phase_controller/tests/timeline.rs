use std::time::Duration;

use breathwave_core::{
    AnimationConfig, BreathingPattern, CountRange, HeightRange, PhaseDuration, PhaseKind,
    PhaseSpec,
};
use breathwave_system_phase_controller::PhaseController;

const CANVAS_HEIGHT: f64 = 1920.0;

fn secs(value: f64) -> Duration {
    Duration::from_secs_f64(value)
}

fn controller(config: AnimationConfig) -> PhaseController {
    PhaseController::new(config.validate().expect("valid config"), Duration::ZERO)
}

#[test]
fn two_phase_wave_in_reaches_full_height_after_travel_time() {
    let mut controller = controller(AnimationConfig::two_phase());
    let travel_seconds = CANVAS_HEIGHT / AnimationConfig::REFERENCE_WAVE_IN_SPEED;

    let midway = controller.advance(secs(travel_seconds / 2.0));
    assert_eq!(midway.active_phase_kind, PhaseKind::Rise);
    assert!((midway.wave_height_pixels - CANVAS_HEIGHT / 2.0).abs() < 1e-6);

    let seam = controller.advance(Duration::from_millis(3200));
    assert_eq!(seam.wave_height_pixels, CANVAS_HEIGHT);
    assert_eq!(controller.state().current_phase_index(), 1);
    assert_eq!(controller.state().phase_start(), Duration::from_millis(3200));

    let wave_out = controller.advance(Duration::from_millis(3200));
    assert_eq!(wave_out.active_phase_kind, PhaseKind::HoldCountUp);
    assert_eq!(wave_out.wave_height_pixels, CANVAS_HEIGHT);
    assert_eq!(wave_out.display_count.map(|count| count.value), Some(1));
}

#[test]
fn four_phase_timeline_hits_each_seam() {
    let mut controller = controller(AnimationConfig::four_phase());

    let start = controller.advance(Duration::ZERO);
    assert_eq!(start.wave_height_pixels, CANVAS_HEIGHT);
    assert_eq!(start.display_count, None);

    let inhale_end = controller.advance(secs(4.0));
    assert_eq!(inhale_end.wave_height_pixels, 0.0);
    assert_eq!(controller.state().current_phase_index(), 1);

    let exhale_mid = controller.advance(secs(6.0));
    assert_eq!(exhale_mid.active_phase_kind, PhaseKind::Fall);
    assert!((exhale_mid.wave_height_pixels - CANVAS_HEIGHT / 2.0).abs() < 1e-6);

    let exhale_end = controller.advance(secs(8.0));
    assert_eq!(exhale_end.wave_height_pixels, CANVAS_HEIGHT);
    assert_eq!(controller.state().current_phase_index(), 2);

    let finished = controller.advance(secs(48.0));
    assert_eq!(finished.active_phase_kind, PhaseKind::HoldCountUp);
    assert_eq!(finished.wave_height_pixels, 0.0);
    assert_eq!(finished.display_count.map(|count| count.value), Some(40));
    assert!(controller.is_complete(secs(48.0)));
}

#[test]
fn wave_out_late_in_the_phase_shows_final_count() {
    let mut controller = controller(AnimationConfig::four_phase());
    let _ = controller.advance(secs(4.0));
    let _ = controller.advance(secs(8.0));

    let output = controller.advance(secs(8.0 + 39.5));
    let expected_height = CANVAS_HEIGHT * (1.0 - 39.5 / 40.0);

    assert_eq!(output.display_count.map(|count| count.value), Some(40));
    assert!((output.wave_height_pixels - expected_height).abs() < 1e-6);
    assert!(!controller.is_complete(secs(8.0 + 39.5)));
}

#[test]
fn terminal_output_is_frozen() {
    let mut controller = controller(AnimationConfig::four_phase());
    let _ = controller.advance(secs(4.0));
    let _ = controller.advance(secs(8.0));

    let first = controller.advance(secs(48.0));
    for later in [48.0, 60.0, 3_600.0, 86_400.0] {
        assert_eq!(controller.advance(secs(later)), first);
    }
    assert_eq!(controller.state().current_phase_index(), 2);
}

#[test]
fn repeated_timestamps_produce_identical_output() {
    let mut controller = controller(AnimationConfig::four_phase());

    let first = controller.advance(secs(1.25));
    let second = controller.advance(secs(1.25));

    assert_eq!(first, second);
}

#[test]
fn height_is_monotonic_within_each_phase() {
    let config = AnimationConfig::four_phase().validate().expect("valid");
    let phases = config.phases().to_vec();
    let mut controller = PhaseController::new(config, Duration::ZERO);

    let frame = Duration::from_millis(10);
    let mut now = Duration::ZERO;
    let mut previous: Option<(usize, f64)> = None;
    while !controller.is_complete(now) {
        let output = controller.advance(now);
        let phase = &phases[output.phase_index];
        if let Some((index, height)) = previous {
            if index == output.phase_index {
                let delta = output.wave_height_pixels - height;
                if phase.height.end < phase.height.start {
                    assert!(delta <= 0.0, "phase {index} moved against its range");
                } else {
                    assert!(delta >= 0.0, "phase {index} moved against its range");
                }
            }
        }
        previous = Some((output.phase_index, output.wave_height_pixels));
        now += frame;
    }
}

#[test]
fn transitions_are_seamless_for_every_adjacent_pair() {
    let config = BreathingPattern::box_breathing()
        .with_repetitions(2)
        .with_retention(10)
        .into_config()
        .validate()
        .expect("valid");
    let mut controller = PhaseController::new(config, Duration::ZERO);

    let frame = Duration::from_micros(16_667);
    let mut now = Duration::ZERO;
    let mut seams = 0;
    while !controller.is_complete(now) {
        let index = controller.state().current_phase_index();
        let finished = controller.advance(now);
        if controller.state().current_phase_index() != index {
            seams += 1;
            let entered = controller.advance(now);
            assert_eq!(entered.phase_index, index + 1);
            let jump = (entered.wave_height_pixels - finished.wave_height_pixels).abs();
            assert!(jump < 1.0, "jump of {jump}px entering phase {}", index + 1);
        }
        now += frame;
    }

    assert_eq!(seams, 8);
}

#[test]
fn count_up_never_decreases_or_exceeds_its_range() {
    let wave_out = PhaseSpec::new(
        PhaseKind::HoldCountUp,
        PhaseDuration::Seconds(12.0),
        HeightRange::new(1.0, 0.0),
    )
    .with_count(CountRange::new(1, 8));
    let mut controller = controller(AnimationConfig::with_phases(vec![wave_out]));

    let mut last = 0;
    for step in 0..=1_500 {
        let output = controller.advance(Duration::from_millis(step * 10));
        let count = output.display_count.expect("counting phase").value;
        assert!(count >= last);
        assert!(count <= 8);
        last = count;
    }
    assert_eq!(last, 8);
}

#[test]
fn timestamps_before_the_start_clamp_to_the_first_frame() {
    let config = AnimationConfig::four_phase().validate().expect("valid");
    let mut controller = PhaseController::new(config, secs(10.0));

    let output = controller.advance(secs(2.0));

    assert_eq!(output.progress, 0.0);
    assert_eq!(output.wave_height_pixels, CANVAS_HEIGHT);
    assert_eq!(controller.state().current_phase_index(), 0);
}

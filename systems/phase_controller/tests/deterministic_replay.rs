use std::time::Duration;

use breathwave_core::{AnimationConfig, BreathingPattern, FrameOutput, ValidatedConfig};
use breathwave_system_phase_controller::PhaseController;

fn replay(config: ValidatedConfig, frame: Duration, frames: usize) -> Vec<FrameOutput> {
    let mut controller = PhaseController::new(config, Duration::ZERO);
    (0..frames)
        .map(|tick| {
            let now = frame * u32::try_from(tick).expect("frame index fits in u32");
            controller.advance(now)
        })
        .collect()
}

fn completion_time(config: ValidatedConfig, frame: Duration) -> Duration {
    let mut controller = PhaseController::new(config, Duration::ZERO);
    let mut now = Duration::ZERO;
    while !controller.is_complete(now) {
        let _ = controller.advance(now);
        now += frame;
    }
    now
}

#[test]
fn replaying_the_same_timestamps_is_deterministic() {
    let config = BreathingPattern::box_breathing()
        .with_repetitions(3)
        .with_retention(15)
        .into_config()
        .validate()
        .expect("valid");
    let frame = Duration::from_micros(16_667);

    let first = replay(config.clone(), frame, 4_500);
    let second = replay(config, frame, 4_500);

    assert_eq!(first, second);
}

#[test]
fn completion_time_is_independent_of_frame_rate() {
    let config = AnimationConfig::four_phase().validate().expect("valid");
    let total = config.total_duration();
    let transitions = u32::try_from(config.phases().len()).expect("phase count fits in u32");

    for frames_per_second in [24_u32, 30, 60, 144, 240] {
        let frame = Duration::from_secs(1) / frames_per_second;
        let finished = completion_time(config.clone(), frame);

        assert!(
            finished >= total,
            "{frames_per_second} fps finished early at {finished:?}"
        );
        assert!(
            finished < total + frame * transitions,
            "{frames_per_second} fps drifted to {finished:?}"
        );
    }
}

#[test]
fn irregular_frame_spacing_follows_wall_clock() {
    let config = AnimationConfig::four_phase().validate().expect("valid");
    let mut controller = PhaseController::new(config, Duration::ZERO);

    let stutter = [5_u64, 120, 16, 900, 33, 2_500, 16];
    let mut now = Duration::ZERO;
    for millis in stutter.iter().cycle().take(40) {
        now += Duration::from_millis(*millis);
        let output = controller.advance(now);
        assert!(output.wave_height_pixels >= 0.0);
        assert!(output.wave_height_pixels <= 1920.0);
        if let Some(count) = output.display_count {
            assert!(count.is_within_range());
        }
    }

    for _ in 0..3 {
        now += Duration::from_secs(100);
        let _ = controller.advance(now);
    }
    assert_eq!(controller.state().current_phase_index(), 2);
    assert!(controller.is_complete(now + Duration::from_secs(100)));
}

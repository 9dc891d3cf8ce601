use breathwave_core::{
    AnimationConfig, BreathingPattern, CountRange, PhaseDuration, PhaseKind, Rgb, WaveBlend,
};

const FOUR_PHASE_TOML: &str = r##"
[canvas]
width = 1080
height = 1920

[[phases]]
kind = "rise"
duration = { seconds = 4.0 }
height = { start = 1.0, end = 0.0 }

[[phases]]
kind = "fall"
duration = { seconds = 4.0 }
height = { start = 0.0, end = 1.0 }

[[phases]]
kind = "hold_count_up"
duration = "from_count"
height = { start = 1.0, end = 0.0 }
count = { start = 1, end = 40 }

[palette]
sky_top = "#87ceeb"
sand_bottom = [237, 201, 175]

[wave]
blend = "through_mid"
"##;

#[test]
fn parses_hand_written_toml() {
    let config: AnimationConfig = toml::from_str(FOUR_PHASE_TOML).expect("toml parses");

    assert_eq!(config.phases.len(), 3);
    assert_eq!(config.phases[2].kind, PhaseKind::HoldCountUp);
    assert_eq!(config.phases[2].duration, PhaseDuration::FromCount);
    assert_eq!(config.phases[2].count, Some(CountRange::new(1, 40)));
    assert_eq!(config.palette.sky_top, Rgb::new(135, 206, 235));
    assert_eq!(config.palette.deep, Rgb::new(0, 119, 190));
    assert_eq!(config.wave.blend, WaveBlend::ThroughMid);
    assert!((config.wave.amplitude - 100.0).abs() < f64::EPSILON);

    let validated = config.validate().expect("valid timeline");
    assert!((validated.total_duration().as_secs_f64() - 48.0).abs() < 1e-9);
}

#[test]
fn speed_derived_duration_parses() {
    let source = r#"
[[phases]]
kind = "rise"
duration = { from_speed = { pixels_per_second = 480.0 } }
height = { start = 0.0, end = 1.0 }
"#;
    let config: AnimationConfig = toml::from_str(source).expect("toml parses");
    let validated = config.validate().expect("valid");

    assert!((validated.phase_duration(0) - 4.0).abs() < 1e-9);
}

#[test]
fn invalid_hex_color_fails_to_parse() {
    let source = r##"
[[phases]]
kind = "rise"
duration = { seconds = 1.0 }
height = { start = 0.0, end = 1.0 }

[palette]
foam = "#nothex"
"##;
    let error = toml::from_str::<AnimationConfig>(source).expect_err("bad color rejected");

    assert!(error.to_string().contains("invalid color"), "{error}");
}

#[test]
fn serialized_presets_parse_back() {
    for preset in [
        AnimationConfig::two_phase(),
        AnimationConfig::four_phase(),
        BreathingPattern::box_breathing()
            .with_retention(20)
            .into_config(),
    ] {
        let text = toml::to_string_pretty(&preset).expect("preset serializes");
        let parsed: AnimationConfig = toml::from_str(&text).expect("preset parses back");
        assert_eq!(parsed, preset);
    }
}

#[test]
fn patterns_deserialize_with_defaults() {
    let pattern: BreathingPattern =
        toml::from_str("inhale = 4.0\nexhale = 6.0\n").expect("pattern parses");

    assert_eq!(pattern.repetitions, 1);
    assert_eq!(pattern.retention, None);
    assert_eq!(pattern.phases().len(), 2);
}

#[test]
fn pattern_sequences_load_from_toml() {
    let source = r#"
[[patterns]]
inhale = 4.0
first_hold = 4.0
exhale = 4.0
second_hold = 4.0
repetitions = 2

[[patterns]]
inhale = 4.0
first_hold = 7.0
exhale = 8.0
retention = 30
"#;
    let config: AnimationConfig = toml::from_str(source).expect("toml parses");

    assert!(config.phases.is_empty());
    assert_eq!(config.patterns.len(), 2);
    assert_eq!(config.patterns[1].repetitions, 1);

    let validated = config.validate().expect("patterns meet at the bottom");
    assert_eq!(validated.phases().len(), 8 + 3 + 1);
    assert!((validated.total_duration().as_secs_f64() - (32.0 + 19.0 + 30.0)).abs() < 1e-9);
}

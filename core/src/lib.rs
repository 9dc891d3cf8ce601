#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Breathwave animation.
//!
//! This crate defines the configuration surface that connects the host
//! adapters, the phase controller, and the wave renderer. Hosts describe the
//! animation with an [`AnimationConfig`], validate it once into a
//! [`ValidatedConfig`], and hand that to the controller and renderer. The
//! controller emits one [`FrameOutput`] per frame which the renderer consumes
//! without ever touching phase timing.

mod pattern;

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use pattern::BreathingPattern;

/// Width of the reference vertical canvas in pixels.
pub const REFERENCE_CANVAS_WIDTH: u32 = 1080;

/// Height of the reference vertical canvas in pixels.
pub const REFERENCE_CANVAS_HEIGHT: u32 = 1920;

/// Adjacent phases must meet within this many pixels.
const SEAM_TOLERANCE_PIXELS: f64 = 1.0;

/// Smallest accepted distance between wave boundary samples, in pixels.
pub const MIN_SAMPLE_STEP_PIXELS: f64 = 1.0;

/// Opaque RGB color expressed with byte channels.
///
/// Deserializes from either a `[r, g, b]` array or a `"#rrggbb"` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RgbRepr", into = "[u8; 3]")]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(value: &str) -> Result<Self, ConfigError> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ConfigError::InvalidColor(value.to_owned()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ConfigError::InvalidColor(value.to_owned()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.red, color.green, color.blue]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Channels([u8; 3]),
    Hex(String),
}

impl TryFrom<RgbRepr> for Rgb {
    type Error = ConfigError;

    fn try_from(repr: RgbRepr) -> Result<Self, Self::Error> {
        match repr {
            RgbRepr::Channels([red, green, blue]) => Ok(Self::new(red, green, blue)),
            RgbRepr::Hex(value) => Self::from_hex(&value),
        }
    }
}

/// Dimensions of the logical drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Horizontal extent of the canvas.
    pub width: u32,
    /// Vertical extent of the canvas.
    pub height: u32,
}

impl CanvasSize {
    /// Creates a new canvas size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(REFERENCE_CANVAS_WIDTH, REFERENCE_CANVAS_HEIGHT)
    }
}

/// Closed set of phase behaviours understood by the controller.
///
/// Every kind moves the wave along its phase's [`HeightRange`]; the kind only
/// decides whether a numeral is shown and which way it counts. `Rise` and
/// `Fall` name the breath, not the direction of travel, which comes from
/// `height` alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Inhale: no numeral; travels from `height.start` to `height.end`.
    Rise,
    /// Exhale: no numeral; travels from `height.start` to `height.end`.
    Fall,
    /// Numeral counts up once per elapsed second.
    HoldCountUp,
    /// Numeral counts down once per elapsed second.
    HoldCountDown,
}

impl PhaseKind {
    /// Returns `true` when the phase displays a numeral.
    #[must_use]
    pub const fn displays_count(self) -> bool {
        matches!(self, Self::HoldCountUp | Self::HoldCountDown)
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Rise => "rise",
            Self::Fall => "fall",
            Self::HoldCountUp => "hold_count_up",
            Self::HoldCountDown => "hold_count_down",
        };
        f.write_str(label)
    }
}

/// Start and end wave height expressed as fractions of the canvas height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    /// Fraction at progress zero.
    pub start: f64,
    /// Fraction at progress one.
    pub end: f64,
}

impl HeightRange {
    /// Creates a new height range.
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Linearly interpolates the fraction for `progress` in `0.0..=1.0`.
    #[must_use]
    pub fn at(&self, progress: f64) -> f64 {
        self.start + (self.end - self.start) * progress
    }

    /// Absolute distance travelled over the phase, as a fraction.
    #[must_use]
    pub fn travel(&self) -> f64 {
        (self.end - self.start).abs()
    }
}

/// Inclusive range of numerals shown during a counting phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountRange {
    /// First numeral displayed.
    pub start: u32,
    /// Last numeral displayed.
    pub end: u32,
}

impl CountRange {
    /// Creates a new inclusive count range.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of distinct numerals in the range.
    #[must_use]
    pub const fn span(&self) -> u32 {
        self.start.abs_diff(self.end) + 1
    }

    /// Returns `true` when `value` lies within the range regardless of direction.
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        let low = self.start.min(self.end);
        let high = self.start.max(self.end);
        (low..=high).contains(&value)
    }
}

/// How long a phase lasts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDuration {
    /// Fixed wall-clock duration in seconds.
    Seconds(f64),
    /// One second per numeral in the phase's count range.
    FromCount,
    /// Derived from the height travel at a constant speed.
    FromSpeed {
        /// Speed of the wave edge in canvas pixels per second.
        pixels_per_second: f64,
    },
}

/// Rule deciding when the controller leaves a phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Advance as soon as the phase's elapsed time reaches its duration.
    #[default]
    AutoOnElapsed,
}

/// Declarative description of a single animation phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    /// Behaviour of the phase.
    pub kind: PhaseKind,
    /// Rule used to leave the phase.
    #[serde(default)]
    pub transition: Transition,
    /// Length of the phase.
    pub duration: PhaseDuration,
    /// Wave height trajectory as canvas height fractions.
    pub height: HeightRange,
    /// Numerals shown while the phase is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<CountRange>,
}

impl PhaseSpec {
    /// Creates a phase without a count range.
    #[must_use]
    pub const fn new(kind: PhaseKind, duration: PhaseDuration, height: HeightRange) -> Self {
        Self {
            kind,
            transition: Transition::AutoOnElapsed,
            duration,
            height,
            count: None,
        }
    }

    /// Attaches an inclusive count range to the phase.
    #[must_use]
    pub const fn with_count(mut self, count: CountRange) -> Self {
        self.count = Some(count);
        self
    }
}

/// Color stops used by the backdrop, the wave, and the numeral.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Backdrop color at the top scanline.
    pub sky_top: Rgb,
    /// Optional intermediate backdrop stop placed at `horizon`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sky_bottom: Option<Rgb>,
    /// Fraction of the canvas height where `sky_bottom` sits.
    pub horizon: f64,
    /// Backdrop color at the bottom scanline.
    pub sand_bottom: Rgb,
    /// Wave color at its top edge.
    pub foam: Rgb,
    /// Optional middle stop of the wave gradient.
    pub mid: Rgb,
    /// Wave color at its lower boundary.
    pub deep: Rgb,
    /// Color of the numeral overlay.
    pub numeral: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky_top: Rgb::new(135, 206, 235),
            sky_bottom: None,
            horizon: 0.5,
            sand_bottom: Rgb::new(237, 201, 175),
            foam: Rgb::new(255, 255, 255),
            mid: Rgb::new(135, 206, 235),
            deep: Rgb::new(0, 119, 190),
            numeral: Rgb::new(255, 255, 255),
        }
    }
}

/// Gradient used inside the wave polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveBlend {
    /// Two-stop blend from foam straight to deep.
    #[default]
    FoamToDeep,
    /// Three-stop blend from foam through mid to deep.
    ThroughMid,
}

/// Shape of the undulating wave boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Peak vertical displacement of the boundary in pixels.
    pub amplitude: f64,
    /// Radians per horizontal pixel.
    pub spatial_frequency: f64,
    /// Radians per frame clock tick.
    pub temporal_frequency: f64,
    /// Horizontal distance between boundary samples in pixels; at least
    /// [`MIN_SAMPLE_STEP_PIXELS`].
    pub sample_step: f64,
    /// Gradient applied inside the wave.
    pub blend: WaveBlend,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            amplitude: 100.0,
            spatial_frequency: 0.01,
            temporal_frequency: 0.05,
            sample_step: 10.0,
            blend: WaveBlend::FoamToDeep,
        }
    }
}

/// Presentation of the numeral overlay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumeralStyle {
    /// Font size in canvas pixels.
    pub font_size: f32,
}

impl Default for NumeralStyle {
    fn default() -> Self {
        Self { font_size: 150.0 }
    }
}

/// Converts wall-clock time into the cosmetic frame clock used for undulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameClock {
    /// Clock ticks per wall-clock second.
    pub ticks_per_second: f64,
}

impl FrameClock {
    /// Frame clock value after `elapsed` wall-clock time.
    #[must_use]
    pub fn ticks_at(&self, elapsed: Duration) -> f64 {
        elapsed.as_secs_f64() * self.ticks_per_second
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            ticks_per_second: 60.0,
        }
    }
}

/// Complete, unvalidated description of a breathing animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Logical canvas dimensions.
    #[serde(default)]
    pub canvas: CanvasSize,
    /// Ordered, non-looping phase list.
    #[serde(default)]
    pub phases: Vec<PhaseSpec>,
    /// Breathing patterns unrolled, in order, after `phases` during validation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<BreathingPattern>,
    /// Backdrop, wave, and numeral colors.
    #[serde(default)]
    pub palette: Palette,
    /// Undulation parameters.
    #[serde(default)]
    pub wave: WaveParams,
    /// Numeral overlay presentation.
    #[serde(default)]
    pub numeral: NumeralStyle,
    /// Cosmetic clock driving the undulation.
    #[serde(default)]
    pub frame_clock: FrameClock,
}

impl AnimationConfig {
    /// Wave-out retention shared by both reference variants, in seconds.
    pub const REFERENCE_WAVE_OUT_SECONDS: u32 = 40;

    /// Speed of the reference wave-in: 10 pixels per frame at 60 frames per second.
    pub const REFERENCE_WAVE_IN_SPEED: f64 = 600.0;

    /// Creates a configuration with default styling around the provided phases.
    #[must_use]
    pub fn with_phases(phases: Vec<PhaseSpec>) -> Self {
        Self {
            canvas: CanvasSize::default(),
            phases,
            patterns: Vec::new(),
            palette: Palette::default(),
            wave: WaveParams::default(),
            numeral: NumeralStyle::default(),
            frame_clock: FrameClock::default(),
        }
    }

    /// Two-phase variant: the wave rolls in, then retreats while counting up.
    #[must_use]
    pub fn two_phase() -> Self {
        Self::with_phases(vec![
            PhaseSpec::new(
                PhaseKind::Rise,
                PhaseDuration::FromSpeed {
                    pixels_per_second: Self::REFERENCE_WAVE_IN_SPEED,
                },
                HeightRange::new(0.0, 1.0),
            ),
            Self::reference_wave_out(),
        ])
    }

    /// Four-phase variant: inhale, exhale, then the counted wave-out.
    #[must_use]
    pub fn four_phase() -> Self {
        Self::with_phases(vec![
            PhaseSpec::new(
                PhaseKind::Rise,
                PhaseDuration::Seconds(4.0),
                HeightRange::new(1.0, 0.0),
            ),
            PhaseSpec::new(
                PhaseKind::Fall,
                PhaseDuration::Seconds(4.0),
                HeightRange::new(0.0, 1.0),
            ),
            Self::reference_wave_out(),
        ])
    }

    fn reference_wave_out() -> PhaseSpec {
        PhaseSpec::new(
            PhaseKind::HoldCountUp,
            PhaseDuration::Seconds(f64::from(Self::REFERENCE_WAVE_OUT_SECONDS)),
            HeightRange::new(1.0, 0.0),
        )
        .with_count(CountRange::new(1, Self::REFERENCE_WAVE_OUT_SECONDS))
    }

    /// Creates a configuration that plays `patterns` back to back.
    #[must_use]
    pub fn with_patterns(patterns: Vec<BreathingPattern>) -> Self {
        Self {
            patterns,
            ..Self::with_phases(Vec::new())
        }
    }

    /// Checks every invariant and resolves derived phase durations.
    ///
    /// Breathing patterns are unrolled into the phase list first, so the
    /// validated configuration only carries explicit phases.
    pub fn validate(mut self) -> Result<ValidatedConfig, ConfigError> {
        for pattern in std::mem::take(&mut self.patterns) {
            self.phases.extend(pattern.phases());
        }

        let CanvasSize { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidCanvas { width, height });
        }
        if self.phases.is_empty() {
            return Err(ConfigError::EmptyPhases);
        }

        validate_wave(&self.wave)?;
        validate_palette(&self.palette)?;
        if !(self.numeral.font_size.is_finite() && self.numeral.font_size > 0.0) {
            return Err(ConfigError::InvalidFontSize {
                font_size: self.numeral.font_size,
            });
        }
        let ticks_per_second = self.frame_clock.ticks_per_second;
        if !(ticks_per_second.is_finite() && ticks_per_second >= 0.0) {
            return Err(ConfigError::InvalidClockRate { ticks_per_second });
        }

        let canvas_height = f64::from(height);
        let mut durations = Vec::with_capacity(self.phases.len());
        for (index, phase) in self.phases.iter().enumerate() {
            validate_phase(index, phase)?;
            durations.push(resolve_duration(index, phase, canvas_height)?);
        }

        for (index, pair) in self.phases.windows(2).enumerate() {
            let gap_pixels = (pair[0].height.end - pair[1].height.start).abs() * canvas_height;
            if gap_pixels >= SEAM_TOLERANCE_PIXELS {
                return Err(ConfigError::DiscontinuousSeam { index, gap_pixels });
            }
        }

        Ok(ValidatedConfig {
            config: self,
            durations,
        })
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::four_phase()
    }
}

fn validate_wave(wave: &WaveParams) -> Result<(), ConfigError> {
    let finite = [
        ("amplitude", wave.amplitude),
        ("spatial_frequency", wave.spatial_frequency),
        ("temporal_frequency", wave.temporal_frequency),
    ];
    for (name, value) in finite {
        if !value.is_finite() {
            return Err(ConfigError::InvalidWaveParameter { name, value });
        }
    }
    if !(wave.sample_step.is_finite() && wave.sample_step >= MIN_SAMPLE_STEP_PIXELS) {
        return Err(ConfigError::InvalidWaveParameter {
            name: "sample_step",
            value: wave.sample_step,
        });
    }
    Ok(())
}

fn validate_palette(palette: &Palette) -> Result<(), ConfigError> {
    if palette.sky_bottom.is_some() && !(palette.horizon > 0.0 && palette.horizon < 1.0) {
        return Err(ConfigError::InvalidHorizon {
            horizon: palette.horizon,
        });
    }
    Ok(())
}

fn validate_phase(index: usize, phase: &PhaseSpec) -> Result<(), ConfigError> {
    for value in [phase.height.start, phase.height.end] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::HeightOutOfRange { index, value });
        }
    }

    let needs_count =
        phase.kind.displays_count() || matches!(phase.duration, PhaseDuration::FromCount);
    match phase.count {
        None if needs_count => Err(ConfigError::MissingCountRange {
            index,
            kind: phase.kind,
        }),
        Some(_) if !needs_count => Err(ConfigError::UnusedCountRange {
            index,
            kind: phase.kind,
        }),
        Some(count) if phase.kind == PhaseKind::HoldCountUp && count.start > count.end => {
            Err(ConfigError::CountDirection {
                index,
                kind: phase.kind,
            })
        }
        Some(count) if phase.kind == PhaseKind::HoldCountDown && count.start < count.end => {
            Err(ConfigError::CountDirection {
                index,
                kind: phase.kind,
            })
        }
        _ => Ok(()),
    }
}

fn resolve_duration(
    index: usize,
    phase: &PhaseSpec,
    canvas_height: f64,
) -> Result<f64, ConfigError> {
    let seconds = match phase.duration {
        PhaseDuration::Seconds(seconds) => seconds,
        PhaseDuration::FromCount => phase
            .count
            .map(|count| f64::from(count.span()))
            .ok_or(ConfigError::MissingCountRange {
                index,
                kind: phase.kind,
            })?,
        PhaseDuration::FromSpeed { pixels_per_second } => {
            if !(pixels_per_second.is_finite() && pixels_per_second > 0.0) {
                return Err(ConfigError::InvalidSpeed {
                    index,
                    pixels_per_second,
                });
            }
            phase.height.travel() * canvas_height / pixels_per_second
        }
    };

    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(ConfigError::InvalidDuration { index, seconds });
    }
    Ok(seconds)
}

/// Configuration that passed validation, with every phase duration resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedConfig {
    config: AnimationConfig,
    durations: Vec<f64>,
}

impl ValidatedConfig {
    /// Underlying configuration.
    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Logical canvas dimensions.
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.config.canvas
    }

    /// Ordered phase list; never empty.
    #[must_use]
    pub fn phases(&self) -> &[PhaseSpec] {
        &self.config.phases
    }

    /// Resolved duration of the phase at `index`, in seconds.
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the phase list.
    #[must_use]
    pub fn phase_duration(&self, index: usize) -> f64 {
        self.durations[index]
    }

    /// Sum of every phase duration, assuming each seam is hit exactly.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        Duration::from_secs_f64(self.durations.iter().sum())
    }
}

/// Numeral produced by a counting phase together with its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DisplayCount {
    /// Numeral to draw.
    pub value: u32,
    /// Inclusive range declared by the phase.
    pub range: CountRange,
}

impl DisplayCount {
    /// Returns `true` when the numeral lies within the declared range.
    #[must_use]
    pub fn is_within_range(&self) -> bool {
        self.range.contains(self.value)
    }
}

/// Per-frame result of advancing the phase controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    /// Wave height in canvas pixels, clamped to the canvas height.
    pub wave_height_pixels: f64,
    /// Numeral to overlay, when the active phase counts.
    pub display_count: Option<DisplayCount>,
    /// Kind of the phase that produced this frame.
    pub active_phase_kind: PhaseKind,
    /// Index of the phase that produced this frame.
    pub phase_index: usize,
    /// Clamped progress through that phase.
    pub progress: f64,
}

/// Reasons an [`AnimationConfig`] may be rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Canvas dimensions must both be positive.
    #[error("canvas dimensions must be positive (received {width}x{height})")]
    InvalidCanvas {
        /// Provided width.
        width: u32,
        /// Provided height.
        height: u32,
    },
    /// At least one phase is required.
    #[error("the phase list is empty")]
    EmptyPhases,
    /// A resolved duration was zero, negative, or not finite.
    #[error("phase {index} has an invalid duration ({seconds} s)")]
    InvalidDuration {
        /// Offending phase.
        index: usize,
        /// Resolved duration.
        seconds: f64,
    },
    /// A speed-derived duration used a non-positive speed.
    #[error("phase {index} has an invalid speed ({pixels_per_second} px/s)")]
    InvalidSpeed {
        /// Offending phase.
        index: usize,
        /// Provided speed.
        pixels_per_second: f64,
    },
    /// Height fractions must lie within `0.0..=1.0`.
    #[error("phase {index} height fraction {value} lies outside 0..=1")]
    HeightOutOfRange {
        /// Offending phase.
        index: usize,
        /// Provided fraction.
        value: f64,
    },
    /// Counting phases and count-derived durations need a count range.
    #[error("phase {index} ({kind}) requires a count range")]
    MissingCountRange {
        /// Offending phase.
        index: usize,
        /// Kind of the offending phase.
        kind: PhaseKind,
    },
    /// A count range was attached to a phase that neither shows nor times by it.
    #[error("phase {index} ({kind}) shows no numeral, so its count range would be ignored")]
    UnusedCountRange {
        /// Offending phase.
        index: usize,
        /// Kind of the offending phase.
        kind: PhaseKind,
    },
    /// The count range runs against the phase's counting direction.
    #[error("phase {index} ({kind}) has a count range running the wrong way")]
    CountDirection {
        /// Offending phase.
        index: usize,
        /// Kind of the offending phase.
        kind: PhaseKind,
    },
    /// Phase `index` ends away from where phase `index + 1` starts.
    #[error("phases {index} and {} do not meet ({gap_pixels:.2} px apart)", .index + 1)]
    DiscontinuousSeam {
        /// Earlier phase of the pair.
        index: usize,
        /// Distance between the two heights in canvas pixels.
        gap_pixels: f64,
    },
    /// A wave parameter was not finite, or `sample_step` was below
    /// [`MIN_SAMPLE_STEP_PIXELS`].
    #[error("wave parameter `{name}` is invalid ({value})")]
    InvalidWaveParameter {
        /// Field name.
        name: &'static str,
        /// Provided value.
        value: f64,
    },
    /// The backdrop horizon must lie strictly inside the canvas.
    #[error("horizon {horizon} must lie strictly between 0 and 1")]
    InvalidHorizon {
        /// Provided horizon fraction.
        horizon: f64,
    },
    /// Numeral font size must be positive.
    #[error("numeral font size must be positive (received {font_size})")]
    InvalidFontSize {
        /// Provided size.
        font_size: f32,
    },
    /// Frame clock rate must be finite and non-negative.
    #[error("frame clock rate must be finite and non-negative (received {ticks_per_second})")]
    InvalidClockRate {
        /// Provided rate.
        ticks_per_second: f64,
    },
    /// A color string could not be parsed.
    #[error("invalid color `{0}`: expected `#rrggbb`")]
    InvalidColor(String),
}

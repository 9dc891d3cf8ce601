#![allow(clippy::missing_errors_doc)]

use std::{
    error::Error,
    fmt, fs,
    num::{ParseFloatError, ParseIntError},
    path::Path,
};

use anyhow::{Context, Result};
use breathwave_core::{AnimationConfig, BreathingPattern};
use clap::ValueEnum;

/// Built-in phase lists selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    /// Wave rolls in, then retreats while counting up to forty.
    TwoPhase,
    /// Four second inhale, four second exhale, then the counted wave-out.
    #[default]
    FourPhase,
}

impl Preset {
    /// Configuration described by the preset.
    #[must_use]
    pub(crate) fn config(self) -> AnimationConfig {
        match self {
            Self::TwoPhase => AnimationConfig::two_phase(),
            Self::FourPhase => AnimationConfig::four_phase(),
        }
    }
}

/// One `--pattern` occurrence.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PatternArg {
    /// Step durations.
    pub(crate) pattern: BreathingPattern,
    /// Repetitions from an `xN` suffix, overriding `--repetitions`.
    pub(crate) repetitions: Option<u32>,
}

/// Parses `inhale,hold,exhale,hold` or `inhale,exhale` seconds, optionally
/// followed by `xN` repetitions, into a pattern.
pub(crate) fn parse_pattern(value: &str) -> Result<PatternArg, PatternArgError> {
    let (durations, repetitions) = match value.split_once('x') {
        Some((durations, count)) => {
            let count = count.trim();
            let repetitions = count.parse::<u32>().map_err(|error| {
                PatternArgError::InvalidRepetitions {
                    value: count.to_owned(),
                    source: error,
                }
            })?;
            (durations, Some(repetitions))
        }
        None => (value, None),
    };

    let seconds = durations
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|error| PatternArgError::InvalidSeconds {
                    value: part.to_owned(),
                    source: error,
                })
                .and_then(|seconds| {
                    if seconds.is_finite() && seconds >= 0.0 {
                        Ok(seconds)
                    } else {
                        Err(PatternArgError::NegativeSeconds(seconds))
                    }
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let pattern = match seconds.as_slice() {
        [inhale, exhale] => BreathingPattern::new(*inhale, 0.0, *exhale, 0.0),
        [inhale, first_hold, exhale, second_hold] => {
            BreathingPattern::new(*inhale, *first_hold, *exhale, *second_hold)
        }
        other => return Err(PatternArgError::WrongArity(other.len())),
    };
    Ok(PatternArg {
        pattern,
        repetitions,
    })
}

/// Reads and parses a TOML animation configuration.
pub(crate) fn load_config_file(path: &Path) -> Result<AnimationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config_text(&text).with_context(|| format!("in config file {}", path.display()))
}

/// Parses a TOML animation configuration.
pub(crate) fn parse_config_text(text: &str) -> Result<AnimationConfig> {
    toml::from_str(text).context("failed to parse animation config")
}

/// Errors raised while parsing the `--pattern` argument.
#[derive(Debug, PartialEq)]
pub(crate) enum PatternArgError {
    /// The pattern did not list two or four durations.
    WrongArity(usize),
    /// A duration was not a number.
    InvalidSeconds {
        /// Offending text.
        value: String,
        /// Parser failure.
        source: ParseFloatError,
    },
    /// A duration was negative or not finite.
    NegativeSeconds(f64),
    /// The `xN` suffix was not a whole number.
    InvalidRepetitions {
        /// Offending text.
        value: String,
        /// Parser failure.
        source: ParseIntError,
    },
}

impl fmt::Display for PatternArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongArity(count) => write!(
                f,
                "expected inhale,exhale or inhale,hold,exhale,hold (received {count} values)"
            ),
            Self::InvalidSeconds { value, .. } => {
                write!(f, "'{value}' is not a number of seconds")
            }
            Self::NegativeSeconds(seconds) => {
                write!(f, "durations must be finite and non-negative (received {seconds})")
            }
            Self::InvalidRepetitions { value, .. } => {
                write!(f, "'{value}' is not a number of repetitions")
            }
        }
    }
}

impl Error for PatternArgError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSeconds { source, .. } => Some(source),
            Self::InvalidRepetitions { source, .. } => Some(source),
            Self::WrongArity(_) | Self::NegativeSeconds(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_value_pattern_maps_to_each_step() {
        let arg = parse_pattern("4, 7, 8, 0").expect("valid pattern");

        assert_eq!(arg.pattern, BreathingPattern::new(4.0, 7.0, 8.0, 0.0));
        assert_eq!(arg.repetitions, None);
    }

    #[test]
    fn two_value_pattern_has_no_holds() {
        let pattern = parse_pattern("5,5").expect("valid pattern").pattern;

        assert_eq!(pattern.first_hold, 0.0);
        assert_eq!(pattern.second_hold, 0.0);
        assert_eq!(pattern.phases().len(), 2);
    }

    #[test]
    fn pattern_arity_is_checked() {
        assert_eq!(
            parse_pattern("4,4,4"),
            Err(PatternArgError::WrongArity(3))
        );
    }

    #[test]
    fn repetition_suffix_is_parsed() {
        let arg = parse_pattern("4,4,4,4x3").expect("valid pattern");

        assert_eq!(arg.pattern, BreathingPattern::box_breathing());
        assert_eq!(arg.repetitions, Some(3));

        let error = parse_pattern("4,4x-2").expect_err("negative repetitions");
        assert!(
            matches!(error, PatternArgError::InvalidRepetitions { ref value, .. } if value == "-2")
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn pattern_rejects_non_numbers_and_negatives() {
        let error = parse_pattern("4,y").expect_err("y is not a number");
        assert!(matches!(error, PatternArgError::InvalidSeconds { ref value, .. } if value == "y"));
        assert!(error.source().is_some());

        assert_eq!(
            parse_pattern("4,-1"),
            Err(PatternArgError::NegativeSeconds(-1.0))
        );
    }

    #[test]
    fn presets_validate() {
        for preset in [Preset::TwoPhase, Preset::FourPhase] {
            let _ = preset.config().validate().expect("preset is valid");
        }
        assert_eq!(Preset::default(), Preset::FourPhase);
    }

    #[test]
    fn config_text_errors_carry_context() {
        let error = parse_config_text("phases = 3").expect_err("phases must be a list");

        assert!(format!("{error:#}").contains("failed to parse animation config"));
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let error = load_config_file(Path::new("/nonexistent/breathwave.toml"))
            .expect_err("file does not exist");

        assert!(error.to_string().contains("/nonexistent/breathwave.toml"));
    }
}

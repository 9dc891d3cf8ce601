#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Breathwave breathing animation.

mod config_source;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use breathwave_core::AnimationConfig;
use breathwave_rendering::{Color, Presentation, RenderingBackend, WaveRenderer};
use breathwave_rendering_macroquad::MacroquadBackend;
use breathwave_system_phase_controller::PhaseController;
use clap::Parser;
use log::LevelFilter;

use self::config_source::{load_config_file, parse_pattern, PatternArg, Preset};

/// Log target carrying one structured line per rendered frame.
const FRAME_LOG_TARGET: &str = "breathwave::frame";

/// Guided breathing animation with a rising and retreating wave.
#[derive(Debug, Parser)]
#[command(name = "breathwave", version, about)]
struct Cli {
    /// TOML animation configuration to play.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["preset", "pattern"])]
    config: Option<PathBuf>,

    /// Built-in phase list to play when no configuration file is given.
    #[arg(long, value_enum, default_value_t = Preset::default())]
    preset: Preset,

    /// Breathing pattern in seconds: `inhale,hold,exhale,hold` or `inhale,exhale`,
    /// optionally suffixed with `xN` repetitions. Repeat to play several
    /// patterns in order.
    #[arg(long, value_parser = parse_pattern, conflicts_with = "preset")]
    pattern: Vec<PatternArg>,

    /// Number of times each breathing pattern without an `xN` suffix repeats.
    #[arg(long, default_value_t = 1, requires = "pattern")]
    repetitions: u32,

    /// Counted retention in seconds appended after the last breathing pattern.
    #[arg(long, value_name = "SECONDS", requires = "pattern")]
    retention: Option<u32>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,

    /// Log phase, height, count, and frame clock for every frame.
    #[arg(long)]
    diagnostics: bool,

    /// Log frames-per-second metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Render as fast as possible instead of waiting for the display refresh.
    #[arg(long)]
    no_vsync: bool,

    /// Initial window size as a fraction of the logical canvas.
    #[arg(long, default_value_t = 0.45)]
    window_scale: f32,

    /// TrueType font used for the numeral overlay.
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,
}

impl Cli {
    fn animation_config(&self) -> Result<AnimationConfig> {
        if let Some(path) = &self.config {
            return load_config_file(path);
        }

        if self.pattern.is_empty() {
            return Ok(self.preset.config());
        }

        let mut patterns: Vec<_> = self
            .pattern
            .iter()
            .map(|arg| {
                arg.pattern
                    .clone()
                    .with_repetitions(arg.repetitions.unwrap_or(self.repetitions))
            })
            .collect();
        if let Some(last) = patterns.last_mut() {
            last.retention = self.retention;
        }
        Ok(AnimationConfig::with_patterns(patterns))
    }
}

/// Entry point for the Breathwave command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.diagnostics);

    let config = cli
        .animation_config()?
        .validate()
        .context("animation configuration is invalid")?;
    if cli.dump_config {
        let text =
            toml::to_string_pretty(config.config()).context("failed to serialise config")?;
        print!("{text}");
        return Ok(());
    }

    log::info!(
        "playing {} phases over {:.1}s",
        config.phases().len(),
        config.total_duration().as_secs_f64()
    );

    let presentation = Presentation::new(
        "Breathwave",
        config.canvas(),
        Color::from_rgb_u8(0, 0, 0),
    );
    let frame_clock = config.config().frame_clock;
    let mut renderer = WaveRenderer::new(&config);
    let mut controller = PhaseController::new(config, Duration::ZERO);
    let mut completion_logged = false;

    MacroquadBackend::new()
        .with_vsync(!cli.no_vsync)
        .with_show_fps(cli.show_fps)
        .with_window_scale(cli.window_scale)
        .with_font_path(cli.font)
        .run(presentation, move |tick, canvas| {
            let output = controller.advance(tick.now);
            let ticks = frame_clock.ticks_at(tick.now);
            log::debug!(
                target: FRAME_LOG_TARGET,
                "phase={} kind={} progress={:.3} height={:.1} count={:?} clock={:.1}",
                output.phase_index,
                output.active_phase_kind,
                output.progress,
                output.wave_height_pixels,
                output.display_count.map(|count| count.value),
                ticks
            );

            if !completion_logged && controller.is_complete(tick.now) {
                log::info!("animation complete after {:.1}s", tick.now.as_secs_f64());
                completion_logged = true;
            }

            renderer.render(&output, ticks, canvas);
        })
}

fn init_logging(diagnostics: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if diagnostics {
        let _ = builder.filter_module(FRAME_LOG_TARGET, LevelFilter::Debug);
    }
    builder.init();
}

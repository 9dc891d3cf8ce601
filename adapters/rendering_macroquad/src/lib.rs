#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Breathwave.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The crate therefore depends on macroquad without its default `audio`
//! feature.
//!
//! The logical canvas is letterboxed into the window: it keeps its aspect
//! ratio, is scaled to the largest size that fits, and is centered.

use anyhow::Result;
use breathwave_core::CanvasSize;
use breathwave_rendering::{
    Canvas, Color, CurtainPolygon, FrameTick, Presentation, RenderResourceError, RenderingBackend,
};
use glam::Vec2;
use macroquad::{
    input::{is_key_pressed, KeyCode},
    models::{draw_mesh, Mesh, Vertex},
    text::{draw_text_ex, load_ttf_font_from_bytes, measure_text, Font, TextParams},
};
use std::{
    collections::VecDeque,
    path::PathBuf,
    time::{Duration, Instant},
};

const MAX_TRIANGLES_PER_MESH: usize = 1_000;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_scale: f32,
    font_path: Option<PathBuf>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_scale: 0.45,
            font_path: None,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Sets the initial window size as a fraction of the logical canvas.
    #[must_use]
    pub fn with_window_scale(mut self, scale: f32) -> Self {
        self.window_scale = scale;
        self
    }

    /// Loads the numeral font from a TTF file instead of macroquad's built-in font.
    #[must_use]
    pub fn with_font_path(mut self, path: Option<PathBuf>) -> Self {
        self.font_path = path;
        self
    }
}

/// Where the numeral glyphs come from.
#[derive(Clone, Copy)]
enum FontSource {
    Builtin,
    Loaded(Font),
    Unavailable(&'static str),
}

impl FontSource {
    /// Parses the font file read at startup; must run inside the window's GL context.
    fn load(file: Option<&std::io::Result<Vec<u8>>>) -> Self {
        match file {
            None => Self::Builtin,
            Some(Err(_)) => Self::Unavailable("the configured font file could not be read"),
            Some(Ok(bytes)) => match load_ttf_font_from_bytes(bytes) {
                Ok(font) => Self::Loaded(font),
                Err(error) => {
                    log::warn!("failed to parse numeral font: {error:?}");
                    Self::Unavailable("the configured font file could not be parsed")
                }
            },
        }
    }
}

/// Scale and offsets that letterbox the logical canvas into the window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CanvasMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    canvas_height: f32,
}

impl CanvasMetrics {
    fn fit(canvas: CanvasSize, screen_width: f32, screen_height: f32) -> Self {
        let canvas_width = canvas.width as f32;
        let canvas_height = canvas.height as f32;
        let scale = (screen_width / canvas_width)
            .min(screen_height / canvas_height)
            .max(0.0);

        Self {
            scale,
            offset_x: (screen_width - canvas_width * scale) / 2.0,
            offset_y: (screen_height - canvas_height * scale) / 2.0,
            canvas_height,
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }
}

/// [`Canvas`] that draws into the current macroquad frame.
struct MacroquadCanvas {
    metrics: CanvasMetrics,
    draw_color: macroquad::color::Color,
    font: FontSource,
}

impl Canvas for MacroquadCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = to_macroquad_color(color);
    }

    fn draw_horizontal_line(&mut self, y: f32, width: f32) {
        let start = self.metrics.to_screen(Vec2::new(0.0, y + 0.5));
        let end = self.metrics.to_screen(Vec2::new(width, y + 0.5));
        macroquad::shapes::draw_line(
            start.x,
            start.y,
            end.x,
            end.y,
            self.metrics.scale,
            self.draw_color,
        );
    }

    fn fill_polygon(&mut self, polygon: &CurtainPolygon) {
        for mesh in polygon_meshes(polygon, &self.metrics) {
            draw_mesh(&mesh);
        }
    }

    fn draw_centered_text(
        &mut self,
        text: &str,
        center: Vec2,
        font_size: f32,
    ) -> Result<(), RenderResourceError> {
        let font = match self.font {
            FontSource::Builtin => None,
            FontSource::Loaded(font) => Some(font),
            FontSource::Unavailable(reason) => {
                return Err(RenderResourceError::FontUnavailable {
                    reason: reason.to_owned(),
                })
            }
        };

        let size = (font_size * self.metrics.scale)
            .round()
            .clamp(1.0, f32::from(u16::MAX)) as u16;
        let dimensions = measure_text(text, font, size, 1.0);
        let center = self.metrics.to_screen(center);
        let x = center.x - dimensions.width / 2.0;
        let baseline = center.y - dimensions.height / 2.0 + dimensions.offset_y;

        let mut params = TextParams {
            font_size: size,
            color: self.draw_color,
            ..TextParams::default()
        };
        if let Some(font) = font {
            params.font = font;
        }
        draw_text_ex(text, x, baseline, params);
        Ok(())
    }
}

/// Clips the polygon to the canvas rows and splits its triangles into meshes
/// small enough for one draw call.
fn polygon_meshes(polygon: &CurtainPolygon, metrics: &CanvasMetrics) -> Vec<Mesh> {
    polygon
        .clipped_to(metrics.canvas_height)
        .triangles()
        .chunks(MAX_TRIANGLES_PER_MESH)
        .map(|triangles| {
            let vertices: Vec<Vertex> = triangles
                .iter()
                .flatten()
                .map(|vertex| {
                    let position = metrics.to_screen(vertex.position);
                    Vertex {
                        position: macroquad::math::vec3(position.x, position.y, 0.0),
                        uv: macroquad::math::vec2(0.0, 0.0),
                        color: to_macroquad_color(vertex.color),
                    }
                })
                .collect();
            let indices = (0..vertices.len())
                .map(|index| index as u16)
                .collect();
            Mesh {
                vertices,
                indices,
                texture: None,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    draw_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_draw: Duration,
}

impl FpsCounter {
    /// Records a presented frame and returns the per-second and trailing ten-second averages
    /// once one second has elapsed.
    fn record_frame(&mut self, frame: Duration, draw: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.draw_accum += draw;

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let avg_draw = self.draw_accum / self.frames.max(1);

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.draw_accum = Duration::ZERO;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_draw,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut draw_frame: F) -> Result<()>
    where
        F: FnMut(FrameTick, &mut dyn Canvas) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_scale,
            font_path,
        } = self;

        let Presentation {
            window_title,
            canvas,
            clear_color,
        } = presentation;

        let font_file = font_path.map(|path| {
            let file = std::fs::read(&path);
            if let Err(error) = &file {
                log::warn!("failed to read font file {}: {error}", path.display());
            }
            file
        });

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: ((canvas.width as f32 * window_scale).round() as i32).max(1),
            window_height: ((canvas.height as f32 * window_scale).round() as i32).max(1),
            high_dpi: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        log::info!(
            "opening {}x{} window for a {}x{} canvas",
            config.window_width,
            config.window_height,
            canvas.width,
            canvas.height
        );

        macroquad::Window::from_config(config, async move {
            let font = FontSource::load(font_file.as_ref());
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut first_frame_at: Option<f64> = None;
            let mut previous = Duration::ZERO;

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    log::info!("escape pressed; closing window");
                    break;
                }

                macroquad::window::clear_background(background);

                let seconds = macroquad::time::get_time();
                let started = *first_frame_at.get_or_insert(seconds);
                let now = Duration::from_secs_f64((seconds - started).max(0.0));
                let tick = FrameTick {
                    now,
                    dt: now.saturating_sub(previous),
                };
                previous = now;

                let mut frame_canvas = MacroquadCanvas {
                    metrics: CanvasMetrics::fit(
                        canvas,
                        macroquad::window::screen_width(),
                        macroquad::window::screen_height(),
                    ),
                    draw_color: macroquad::color::WHITE,
                    font,
                };

                let draw_start = Instant::now();
                draw_frame(tick, &mut frame_canvas);
                let draw_duration = draw_start.elapsed();

                let fps_metrics = fps_counter.record_frame(tick.dt, draw_duration);
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_draw,
                    }) = fps_metrics
                    {
                        log::info!(
                            "FPS: {:.2} (10s avg: {:.2}) | draw: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_draw.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

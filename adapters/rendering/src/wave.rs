//! Backdrop, wave, and numeral drawing for a single frame.

use breathwave_core::{
    CanvasSize, DisplayCount, FrameOutput, NumeralStyle, Palette, ValidatedConfig, WaveBlend,
    WaveParams,
};
use glam::Vec2;

use crate::{Canvas, Color, CurtainPolygon, ShadedVertex};

/// Draws the gradient backdrop, the undulating wave, and the numeral overlay.
///
/// The renderer never influences phase timing; it only consumes the wave
/// height and count reported by the controller plus a cosmetic frame clock.
#[derive(Clone, Debug)]
pub struct WaveRenderer {
    canvas: CanvasSize,
    palette: Palette,
    wave: WaveParams,
    numeral: NumeralStyle,
    font_degraded: bool,
}

impl WaveRenderer {
    /// Creates a renderer for the canvas, palette, and wave shape of `config`.
    #[must_use]
    pub fn new(config: &ValidatedConfig) -> Self {
        let config = config.config();
        Self {
            canvas: config.canvas,
            palette: config.palette,
            wave: config.wave,
            numeral: config.numeral,
            font_degraded: false,
        }
    }

    /// Draws a complete frame.
    ///
    /// A numeral the canvas fails to draw is skipped for this frame; the
    /// backdrop and wave are always drawn.
    pub fn render(&mut self, output: &FrameOutput, frame_clock: f64, canvas: &mut dyn Canvas) {
        self.render_background(canvas);
        self.render_wave(output.wave_height_pixels, frame_clock, canvas);
        self.render_numeral(output.display_count, canvas);
    }

    /// Fills every scanline with the vertical backdrop gradient.
    pub fn render_background(&self, canvas: &mut dyn Canvas) {
        let width = self.canvas.width as f32;
        for y in 0..self.canvas.height {
            canvas.set_draw_color(self.backdrop_color(f64::from(y)));
            canvas.draw_horizontal_line(y as f32, width);
        }
    }

    /// Fills the region between the top edge and the rippled wave boundary.
    pub fn render_wave(&self, height_pixels: f64, frame_clock: f64, canvas: &mut dyn Canvas) {
        canvas.fill_polygon(&self.wave_polygon(height_pixels, frame_clock));
    }

    /// Backdrop color of scanline `y`.
    #[must_use]
    pub fn backdrop_color(&self, y: f64) -> Color {
        let t = (y / f64::from(self.canvas.height)).clamp(0.0, 1.0);
        let top = Color::from(self.palette.sky_top);
        let bottom = Color::from(self.palette.sand_bottom);

        match self.palette.sky_bottom {
            None => top.lerp(bottom, t as f32),
            Some(horizon_color) => {
                let horizon = self.palette.horizon;
                let horizon_color = Color::from(horizon_color);
                if t <= horizon {
                    top.lerp(horizon_color, (t / horizon) as f32)
                } else {
                    horizon_color.lerp(bottom, ((t - horizon) / (1.0 - horizon)) as f32)
                }
            }
        }
    }

    /// Wave fill color at gradient position `inter` (0 at the foam edge).
    #[must_use]
    pub fn wave_color(&self, inter: f64) -> Color {
        let inter = inter.clamp(0.0, 1.0) as f32;
        let foam = Color::from(self.palette.foam);
        let deep = Color::from(self.palette.deep);

        match self.wave.blend {
            WaveBlend::FoamToDeep => foam.lerp(deep, inter),
            WaveBlend::ThroughMid => {
                let mid = Color::from(self.palette.mid);
                if inter < 0.5 {
                    foam.lerp(mid, inter * 2.0)
                } else {
                    mid.lerp(deep, (inter - 0.5) * 2.0)
                }
            }
        }
    }

    /// Builds the shaded wave polygon for `height_pixels` at `frame_clock`.
    ///
    /// Boundary samples run from the right edge to the left edge every
    /// `sample_step` pixels; the left edge is always sampled even when the
    /// width is not a multiple of the step.
    #[must_use]
    pub fn wave_polygon(&self, height_pixels: f64, frame_clock: f64) -> CurtainPolygon {
        let foam = self.wave_color(0.0);
        let columns = self
            .sample_positions()
            .into_iter()
            .map(|x| {
                let y = self.boundary_y(x, height_pixels, frame_clock);
                let inter = if height_pixels > 0.0 {
                    y / height_pixels
                } else {
                    0.0
                };
                (
                    ShadedVertex::new(Vec2::new(x as f32, 0.0), foam),
                    ShadedVertex::new(Vec2::new(x as f32, y as f32), self.wave_color(inter)),
                )
            })
            .collect();
        let closing_inter = if height_pixels > 0.0 { 1.0 } else { 0.0 };
        let closing = ShadedVertex::new(
            Vec2::new(0.0, height_pixels as f32),
            self.wave_color(closing_inter),
        );

        CurtainPolygon::new(columns, closing)
    }

    fn sample_positions(&self) -> Vec<f64> {
        let width = f64::from(self.canvas.width);
        let step = self.wave.sample_step;
        let mut positions: Vec<f64> = (0_u32..)
            .map(|index| width - f64::from(index) * step)
            .take_while(|x| *x > 0.0)
            .collect();
        positions.push(0.0);
        positions
    }

    fn boundary_y(&self, x: f64, height_pixels: f64, frame_clock: f64) -> f64 {
        let WaveParams {
            amplitude,
            spatial_frequency,
            temporal_frequency,
            ..
        } = self.wave;
        height_pixels + amplitude * (x * spatial_frequency + frame_clock * temporal_frequency).sin()
    }

    fn render_numeral(&mut self, count: Option<DisplayCount>, canvas: &mut dyn Canvas) {
        let Some(count) = count.filter(DisplayCount::is_within_range) else {
            return;
        };

        let center = Vec2::new(
            self.canvas.width as f32 / 2.0,
            self.canvas.height as f32 / 2.0,
        );
        canvas.set_draw_color(Color::from(self.palette.numeral));
        match canvas.draw_centered_text(&count.value.to_string(), center, self.numeral.font_size) {
            Ok(()) => {
                if self.font_degraded {
                    log::info!("numeral font available again");
                    self.font_degraded = false;
                }
            }
            Err(error) => {
                if !self.font_degraded {
                    log::warn!("skipping numeral overlay: {error}");
                    self.font_degraded = true;
                }
            }
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Breathwave adapters.
//!
//! The crate defines the [`Canvas`] drawing surface, the [`WaveRenderer`] that
//! turns controller output into draw calls, and the [`RenderingBackend`] trait
//! implemented by windowing adapters.

mod recording;
mod wave;

pub use recording::{DrawCommand, RecordingCanvas};
pub use wave::WaveRenderer;

use anyhow::Result as AnyResult;
use breathwave_core::{CanvasSize, Rgb};
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Blends every channel towards `other`; `amount` is clamped to 0.0..=1.0.
    #[must_use]
    pub fn lerp(self, other: Self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lerp_channel(self.red, other.red, amount),
            green: lerp_channel(self.green, other.green, amount),
            blue: lerp_channel(self.blue, other.blue, amount),
            alpha: lerp_channel(self.alpha, other.alpha, amount),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

fn lerp_channel(from: f32, to: f32, amount: f32) -> f32 {
    from * (1.0 - amount) + to * amount
}

/// Polygon vertex carrying its own fill color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedVertex {
    /// Position in logical canvas pixels.
    pub position: Vec2,
    /// Fill color interpolated towards neighbouring vertices.
    pub color: Color,
}

impl ShadedVertex {
    /// Creates a vertex at `position` filled with `color`.
    #[must_use]
    pub const fn new(position: Vec2, color: Color) -> Self {
        Self { position, color }
    }
}

/// Region hanging from the top edge of the canvas down to a sampled boundary.
///
/// Each column pairs an anchor on the top edge with the boundary sample at the
/// same horizontal position. Columns are ordered from the right edge to the left
/// edge, and the outline closes at the left edge on the unrippled wave height.
#[derive(Clone, Debug, PartialEq)]
pub struct CurtainPolygon {
    columns: Vec<(ShadedVertex, ShadedVertex)>,
    closing: ShadedVertex,
}

impl CurtainPolygon {
    /// Creates a polygon from `(top, boundary)` column pairs and the closing vertex.
    #[must_use]
    pub fn new(columns: Vec<(ShadedVertex, ShadedVertex)>, closing: ShadedVertex) -> Self {
        Self { columns, closing }
    }

    /// Top-anchor and boundary vertex pairs, right to left.
    #[must_use]
    pub fn columns(&self) -> &[(ShadedVertex, ShadedVertex)] {
        &self.columns
    }

    /// Boundary samples, right to left.
    pub fn boundary(&self) -> impl Iterator<Item = ShadedVertex> + '_ {
        self.columns.iter().map(|(_, boundary)| *boundary)
    }

    /// Closed outline: top-left, top-right, boundary samples, closing vertex.
    #[must_use]
    pub fn outline(&self) -> Vec<ShadedVertex> {
        let mut outline = Vec::with_capacity(self.columns.len() + 3);
        if let (Some((top_right, _)), Some((top_left, _))) =
            (self.columns.first(), self.columns.last())
        {
            outline.push(*top_left);
            outline.push(*top_right);
        }
        outline.extend(self.boundary());
        outline.push(self.closing);
        outline
    }

    /// Copy of the polygon with every vertex pulled into the rows `0..=max_y`.
    ///
    /// Columns are vertical, so clamping vertices clips each strip to the
    /// canvas rows; only a strip crossing an edge between two samples is
    /// approximated by a chord.
    #[must_use]
    pub fn clipped_to(&self, max_y: f32) -> Self {
        let clip = |vertex: ShadedVertex| ShadedVertex {
            position: Vec2::new(vertex.position.x, vertex.position.y.max(0.0).min(max_y)),
            ..vertex
        };

        Self {
            columns: self
                .columns
                .iter()
                .map(|(top, boundary)| (clip(*top), clip(*boundary)))
                .collect(),
            closing: clip(self.closing),
        }
    }

    /// Triangles covering the polygon, two per column strip.
    ///
    /// The closing vertex lies on the left edge below the last boundary sample
    /// and encloses no area, so it contributes no triangle.
    #[must_use]
    pub fn triangles(&self) -> Vec<[ShadedVertex; 3]> {
        self.columns
            .windows(2)
            .flat_map(|pair| {
                let (top_right, bottom_right) = pair[0];
                let (top_left, bottom_left) = pair[1];
                [
                    [top_right, top_left, bottom_left],
                    [top_right, bottom_left, bottom_right],
                ]
            })
            .collect()
    }
}

/// Drawing surface addressed in logical canvas pixels.
///
/// Implementations must be object safe; the renderer only ever sees
/// `&mut dyn Canvas`.
pub trait Canvas {
    /// Sets the color used by subsequent line and text calls.
    fn set_draw_color(&mut self, color: Color);

    /// Draws a one pixel tall line across `0..width` at scanline `y`.
    fn draw_horizontal_line(&mut self, y: f32, width: f32);

    /// Fills a polygon, interpolating the per-vertex colors.
    fn fill_polygon(&mut self, polygon: &CurtainPolygon);

    /// Draws `text` centered on `center` at `font_size` pixels.
    fn draw_centered_text(
        &mut self,
        text: &str,
        center: Vec2,
        font_size: f32,
    ) -> Result<(), RenderResourceError>;
}

/// A drawing dependency that was unavailable for the current frame.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderResourceError {
    /// The numeral font could not be loaded or used.
    #[error("font unavailable: {reason}")]
    FontUnavailable {
        /// Human readable cause reported by the backend.
        reason: String,
    },
}

/// Timing information handed to the frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTick {
    /// Monotonic time since the first frame.
    pub now: Duration,
    /// Time elapsed since the previous frame.
    pub dt: Duration,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Logical canvas the frame callback draws into.
    pub canvas: CanvasSize,
    /// Solid color used to clear each frame, visible around a letterboxed canvas.
    pub clear_color: Color,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, canvas: CanvasSize, clear_color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            canvas,
            clear_color,
        }
    }
}

/// Rendering backend capable of presenting Breathwave frames.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The `draw_frame` closure is invoked once per displayed frame with the
    /// wall-clock time measured from the first frame and a canvas sized to the
    /// presentation's logical dimensions.
    fn run<F>(self, presentation: Presentation, draw_frame: F) -> AnyResult<()>
    where
        F: FnMut(FrameTick, &mut dyn Canvas) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32) -> ShadedVertex {
        ShadedVertex::new(Vec2::new(x, y), Color::from_rgb_u8(255, 255, 255))
    }

    fn three_column_polygon() -> CurtainPolygon {
        CurtainPolygon::new(
            vec![
                (vertex(20.0, 0.0), vertex(20.0, 12.0)),
                (vertex(10.0, 0.0), vertex(10.0, 8.0)),
                (vertex(0.0, 0.0), vertex(0.0, 10.0)),
            ],
            vertex(0.0, 10.0),
        )
    }

    #[test]
    fn color_lerp_clamps_amount() {
        let black = Color::from_rgb_u8(0, 0, 0);
        let white = Color::from_rgb_u8(255, 255, 255);

        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, 4.0), white);
        assert_eq!(black.lerp(white, -1.0), black);
        assert!((black.lerp(white, 0.25).green - 0.25).abs() <= 1e-6);
    }

    #[test]
    fn rgb_conversion_is_opaque() {
        let color = Color::from(Rgb::new(0, 119, 190));

        assert!((color.blue - 190.0 / 255.0).abs() <= f32::EPSILON);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn outline_starts_on_the_top_edge_and_ends_at_the_closing_vertex() {
        let outline = three_column_polygon().outline();
        let positions: Vec<_> = outline.iter().map(|vertex| vertex.position).collect();

        assert_eq!(
            positions,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(20.0, 0.0),
                Vec2::new(20.0, 12.0),
                Vec2::new(10.0, 8.0),
                Vec2::new(0.0, 10.0),
                Vec2::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn triangles_cover_each_column_strip_once() {
        let polygon = three_column_polygon();
        let triangles = polygon.triangles();

        assert_eq!(triangles.len(), 4);
        let area: f32 = triangles
            .iter()
            .map(|[a, b, c]| {
                let ab = b.position - a.position;
                let ac = c.position - a.position;
                (ab.x * ac.y - ab.y * ac.x).abs() / 2.0
            })
            .sum();
        // Two trapezoids: 10 * (12 + 8) / 2 + 10 * (8 + 10) / 2.
        assert!((area - 190.0).abs() <= 1e-3);
    }

    #[test]
    fn clipping_keeps_the_boundary_inside_the_canvas_rows() {
        let polygon = CurtainPolygon::new(
            vec![
                (vertex(20.0, 0.0), vertex(20.0, 130.0)),
                (vertex(10.0, 0.0), vertex(10.0, -15.0)),
                (vertex(0.0, 0.0), vertex(0.0, 60.0)),
            ],
            vertex(0.0, 100.0),
        );

        let clipped = polygon.clipped_to(100.0);
        let boundary: Vec<_> = clipped.boundary().map(|vertex| vertex.position).collect();

        assert_eq!(
            boundary,
            vec![
                Vec2::new(20.0, 100.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(0.0, 60.0),
            ]
        );
        assert_eq!(clipped.outline().last().map(|v| v.position), Some(Vec2::new(0.0, 100.0)));
        assert!(clipped
            .triangles()
            .iter()
            .flatten()
            .all(|vertex| (0.0..=100.0).contains(&vertex.position.y)));
    }

    #[test]
    fn empty_polygon_has_only_its_closing_vertex() {
        let polygon = CurtainPolygon::new(Vec::new(), vertex(0.0, 5.0));

        assert_eq!(polygon.outline().len(), 1);
        assert!(polygon.triangles().is_empty());
    }
}

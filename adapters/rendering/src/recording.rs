//! Canvas that records draw calls instead of rasterising them.

use glam::Vec2;

use crate::{Canvas, Color, CurtainPolygon, RenderResourceError};

/// Single call captured by a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// The draw color changed.
    SetDrawColor(Color),
    /// A full-width scanline was drawn.
    HorizontalLine {
        /// Scanline in canvas pixels.
        y: f32,
        /// Line length in canvas pixels.
        width: f32,
    },
    /// A shaded polygon was filled.
    Polygon(CurtainPolygon),
    /// Text was drawn with the current draw color.
    Text {
        /// Rendered string.
        text: String,
        /// Center of the text in canvas pixels.
        center: Vec2,
        /// Font size in canvas pixels.
        font_size: f32,
        /// Draw color active when the text was drawn.
        color: Color,
    },
}

/// Headless [`Canvas`] used by tests and diagnostics.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    draw_color: Color,
    font_available: bool,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            draw_color: Color::from_rgb_u8(0, 0, 0),
            font_available: true,
        }
    }
}

impl RecordingCanvas {
    /// Creates an empty recording canvas with a working font.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a canvas whose text calls fail as if no font were loaded.
    #[must_use]
    pub fn without_font() -> Self {
        Self {
            font_available: false,
            ..Self::default()
        }
    }

    /// Commands recorded so far, in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Colors of every recorded scanline, paired with its `y`.
    #[must_use]
    pub fn scanlines(&self) -> Vec<(f32, Color)> {
        let mut color = Color::from_rgb_u8(0, 0, 0);
        let mut scanlines = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetDrawColor(next) => color = *next,
                DrawCommand::HorizontalLine { y, .. } => scanlines.push((*y, color)),
                DrawCommand::Polygon(_) | DrawCommand::Text { .. } => {}
            }
        }
        scanlines
    }

    /// Polygons recorded so far.
    pub fn polygons(&self) -> impl Iterator<Item = &CurtainPolygon> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Polygon(polygon) => Some(polygon),
            _ => None,
        })
    }

    /// Strings drawn so far.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
        self.commands.push(DrawCommand::SetDrawColor(color));
    }

    fn draw_horizontal_line(&mut self, y: f32, width: f32) {
        self.commands.push(DrawCommand::HorizontalLine { y, width });
    }

    fn fill_polygon(&mut self, polygon: &CurtainPolygon) {
        self.commands.push(DrawCommand::Polygon(polygon.clone()));
    }

    fn draw_centered_text(
        &mut self,
        text: &str,
        center: Vec2,
        font_size: f32,
    ) -> Result<(), RenderResourceError> {
        if !self.font_available {
            return Err(RenderResourceError::FontUnavailable {
                reason: "recording canvas has no font".to_owned(),
            });
        }

        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            center,
            font_size,
            color: self.draw_color,
        });
        Ok(())
    }
}

use anyhow::Result;
use embedded_graphics::prelude::{Point, Size};
use image::RgbaImage;

use super::{Canvas, Pen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Pen),
    Text {
        text: String,
        at: Point,
        pen: Pen,
        scale: u8,
    },
    Line {
        from: Point,
        to: Point,
        pen: Pen,
    },
    Rectangle {
        at: Point,
        size: Size,
        pen: Pen,
    },
    Image {
        at: Point,
        size: Size,
    },
    Commit,
}

/// Canvas that only records what was asked of it. Text is measured with a
/// fixed per-character advance so geometry is predictable.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: Size,
    glyph_advance: u32,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            glyph_advance: 6,
            ops: Vec::new(),
        }
    }

    pub fn with_glyph_advance(mut self, advance: u32) -> Self {
        self.glyph_advance = advance;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_op(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }

    pub fn committed(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Commit))
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, pen: Pen) {
        self.ops.push(DrawOp::Clear(pen));
    }

    fn measure_text(&self, text: &str, scale: u8) -> u32 {
        text.chars().count() as u32 * self.glyph_advance * u32::from(scale.max(1))
    }

    fn draw_text(&mut self, text: &str, at: Point, pen: Pen, scale: u8) -> u32 {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            pen,
            scale,
        });
        self.measure_text(text, scale)
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: Pen) {
        self.ops.push(DrawOp::Line { from, to, pen });
    }

    fn draw_rectangle(&mut self, at: Point, size: Size, pen: Pen) {
        self.ops.push(DrawOp::Rectangle { at, size, pen });
    }

    fn draw_image(&mut self, image: &RgbaImage, at: Point) {
        self.ops.push(DrawOp::Image {
            at,
            size: Size::new(image.width(), image.height()),
        });
    }

    fn commit(&mut self) -> Result<()> {
        self.ops.push(DrawOp::Commit);
        Ok(())
    }
}

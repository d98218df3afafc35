use anyhow::Result;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{Point, Size};
use image::RgbaImage;

mod frame;
mod recording;

pub use frame::FrameCanvas;
pub use recording::{DrawOp, RecordingCanvas};

/// Inky Frame 7.3" panel resolution.
pub const PANEL_WIDTH: u32 = 800;
pub const PANEL_HEIGHT: u32 = 480;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pen {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Gray,
}

impl Pen {
    pub fn rgb(self) -> Rgb888 {
        match self {
            Pen::Black => Rgb888::new(0, 0, 0),
            Pen::White => Rgb888::new(255, 255, 255),
            Pen::Red => Rgb888::new(180, 0, 0),
            Pen::Green => Rgb888::new(0, 255, 0),
            Pen::Blue => Rgb888::new(0, 0, 255),
            Pen::Yellow => Rgb888::new(255, 255, 0),
            Pen::Orange => Rgb888::new(255, 140, 0),
            Pen::Gray => Rgb888::new(128, 128, 128),
        }
    }
}

pub trait Canvas {
    fn size(&self) -> Size;

    fn clear(&mut self, pen: Pen);

    /// Rendered width of `text` at `scale`, in pixels.
    fn measure_text(&self, text: &str, scale: u8) -> u32;

    /// Draws `text` with its top-left corner at `at` and returns its width.
    fn draw_text(&mut self, text: &str, at: Point, pen: Pen, scale: u8) -> u32;

    fn draw_line(&mut self, from: Point, to: Point, pen: Pen);

    fn draw_rectangle(&mut self, at: Point, size: Size, pen: Pen);

    fn draw_image(&mut self, image: &RgbaImage, at: Point);

    /// Pushes the finished frame to the panel.
    fn commit(&mut self) -> Result<()>;
}

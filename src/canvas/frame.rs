use std::convert::Infallible;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::iso_8859_1::{FONT_5X8, FONT_10X20};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use image::{RgbImage, RgbaImage};

use super::{Canvas, Pen};

struct Frame {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl Frame {
    fn index(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some((y * self.size.width + x) as usize)
    }
}

/// Host framebuffer; `commit` writes the frame out as a PNG.
pub struct FrameCanvas {
    frame: Frame,
    output: PathBuf,
}

impl FrameCanvas {
    pub fn new(width: u32, height: u32, output: impl Into<PathBuf>) -> Self {
        Self {
            frame: Frame {
                size: Size::new(width, height),
                pixels: vec![Pen::White.rgb(); (width * height) as usize],
            },
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let idx = self.frame.index(Point::new(x as i32, y as i32))?;
        let c = self.frame.pixels[idx];
        Some([c.r(), c.g(), c.b()])
    }

    fn font(scale: u8) -> &'static MonoFont<'static> {
        if scale <= 1 { &FONT_5X8 } else { &FONT_10X20 }
    }

    fn to_image(&self) -> RgbImage {
        let width = self.frame.size.width;
        RgbImage::from_fn(width, self.frame.size.height, |x, y| {
            let c = self.frame.pixels[(y * width + x) as usize];
            image::Rgb([c.r(), c.g(), c.b()])
        })
    }
}

impl Canvas for FrameCanvas {
    fn size(&self) -> Size {
        self.frame.size
    }

    fn clear(&mut self, pen: Pen) {
        let _ = self.frame.clear(pen.rgb());
    }

    fn measure_text(&self, text: &str, scale: u8) -> u32 {
        let font = Self::font(scale);
        let advance = font.character_size.width + font.character_spacing;
        text.chars().count() as u32 * advance
    }

    fn draw_text(&mut self, text: &str, at: Point, pen: Pen, scale: u8) -> u32 {
        let style = MonoTextStyle::new(Self::font(scale), pen.rgb());
        let _ = Text::with_baseline(text, at, style, Baseline::Top).draw(&mut self.frame);
        self.measure_text(text, scale)
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: Pen) {
        let _ = Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(pen.rgb(), 1))
            .draw(&mut self.frame);
    }

    fn draw_rectangle(&mut self, at: Point, size: Size, pen: Pen) {
        let _ = Rectangle::new(at, size)
            .into_styled(PrimitiveStyle::with_fill(pen.rgb()))
            .draw(&mut self.frame);
    }

    fn draw_image(&mut self, image: &RgbaImage, at: Point) {
        let pixels = image
            .enumerate_pixels()
            .filter(|(_, _, px)| px.0[3] >= 128)
            .map(|(x, y, px)| {
                Pixel(
                    Point::new(at.x + x as i32, at.y + y as i32),
                    Rgb888::new(px.0[0], px.0[1], px.0[2]),
                )
            });
        let _ = self.frame.draw_iter(pixels);
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(dir) = self.output.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).context("create output dir")?;
            }
        }
        self.to_image()
            .save(&self.output)
            .with_context(|| format!("write frame to {}", self.output.display()))?;
        log::info!("frame written to {}", self.output.display());
        Ok(())
    }
}

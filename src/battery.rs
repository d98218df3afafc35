use embedded_graphics::prelude::{Point, Size};

use crate::canvas::{Canvas, Pen};

const FULL_VOLTS: f32 = 4.2;
const EMPTY_VOLTS: f32 = 2.8;
// VSYS sits behind a 3:1 divider on a 3.3V, 16-bit ADC.
const ADC_VOLTS_PER_COUNT: f32 = 3.0 * 3.3 / 65535.0;

const BODY_WIDTH: u32 = 38;
const BODY_HEIGHT: u32 = 13;
const RIGHT_PADDING: u32 = 12;
const TOP: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub voltage: f32,
    pub on_usb: bool,
}

impl BatteryReading {
    pub fn percentage(&self) -> f32 {
        percentage(self.voltage)
    }
}

/// Capability that samples the supply rail.
pub trait BatterySensor {
    fn read(&mut self) -> Option<BatteryReading>;
}

/// Sensor with a reading fixed at construction (from config on the host).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBattery(pub Option<BatteryReading>);

impl BatterySensor for FixedBattery {
    fn read(&mut self) -> Option<BatteryReading> {
        self.0
    }
}

pub fn voltage_from_adc(raw: u16) -> f32 {
    f32::from(raw) * ADC_VOLTS_PER_COUNT
}

pub fn percentage(voltage: f32) -> f32 {
    (100.0 * (voltage - EMPTY_VOLTS) / (FULL_VOLTS - EMPTY_VOLTS)).clamp(0.0, 100.0)
}

pub fn level_pen(percent: f32) -> Pen {
    if percent >= 40.0 {
        Pen::Green
    } else if percent >= 20.0 {
        Pen::Orange
    } else {
        Pen::Red
    }
}

/// Battery glyph in the top-right corner with either the charge level or
/// "USB" next to it.
pub fn draw_battery<C: Canvas + ?Sized>(canvas: &mut C, reading: &BatteryReading) {
    let width = canvas.size().width;
    let x = width.saturating_sub(BODY_WIDTH + RIGHT_PADDING) as i32;
    let pct = reading.percentage();

    canvas.draw_rectangle(Point::new(x, TOP), Size::new(BODY_WIDTH, BODY_HEIGHT), Pen::Black);
    canvas.draw_rectangle(
        Point::new(x + BODY_WIDTH as i32, TOP + 4),
        Size::new(3, 5),
        Pen::Black,
    );
    canvas.draw_rectangle(
        Point::new(x + 1, TOP + 1),
        Size::new(BODY_WIDTH - 2, BODY_HEIGHT - 2),
        Pen::White,
    );
    let fill = ((BODY_WIDTH - 4) as f32 * (pct / 100.0)).round() as u32;
    if fill > 0 {
        canvas.draw_rectangle(
            Point::new(x + 2, TOP + 2),
            Size::new(fill, BODY_HEIGHT - 4),
            level_pen(pct),
        );
    }

    if reading.on_usb {
        canvas.draw_text("USB", Point::new(x - 50, TOP), Pen::Blue, 2);
    } else {
        canvas.draw_text(&format!("{pct:.0}%"), Point::new(x - 40, TOP), Pen::Black, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};

    #[test]
    fn percentage_is_clamped() {
        assert_eq!(percentage(4.2), 100.0);
        assert_eq!(percentage(4.5), 100.0);
        assert_eq!(percentage(2.8), 0.0);
        assert_eq!(percentage(2.0), 0.0);
        assert!((percentage(3.5) - 50.0).abs() < 0.01);
    }

    #[test]
    fn adc_conversion_full_scale() {
        assert!((voltage_from_adc(65535) - 9.9).abs() < 0.001);
        assert_eq!(voltage_from_adc(0), 0.0);
    }

    #[test]
    fn level_colours() {
        assert_eq!(level_pen(80.0), Pen::Green);
        assert_eq!(level_pen(40.0), Pen::Green);
        assert_eq!(level_pen(39.9), Pen::Orange);
        assert_eq!(level_pen(20.0), Pen::Orange);
        assert_eq!(level_pen(5.0), Pen::Red);
    }

    #[test]
    fn usb_power_shows_label_instead_of_percent() {
        let mut canvas = RecordingCanvas::new(800, 480);
        draw_battery(
            &mut canvas,
            &BatteryReading {
                voltage: 4.0,
                on_usb: true,
            },
        );
        assert_eq!(canvas.texts(), vec!["USB"]);
        match canvas.text_op("USB") {
            Some(DrawOp::Text { at, pen, .. }) => {
                assert_eq!(*at, Point::new(750 - 50, 2));
                assert_eq!(*pen, Pen::Blue);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn battery_level_bar_width() {
        let mut canvas = RecordingCanvas::new(800, 480);
        draw_battery(
            &mut canvas,
            &BatteryReading {
                voltage: 3.5,
                on_usb: false,
            },
        );
        assert_eq!(canvas.texts(), vec!["50%"]);
        let bar = canvas.ops().iter().find_map(|op| match op {
            DrawOp::Rectangle { size, pen, .. } if *pen == Pen::Green => Some(*size),
            _ => None,
        });
        assert_eq!(bar, Some(Size::new(17, 9)));
    }
}

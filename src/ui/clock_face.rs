use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Widget,
    },
};

const RADIUS: f64 = 1.0;
const LABEL_RADIUS: f64 = 0.82;
const HOUR_HAND: f64 = 0.5;
const MINUTE_HAND: f64 = 0.78;
// leave room around the dial
const BOUNDS: f64 = 1.15;

/// Hour hand angle in radians, clockwise from twelve. Moves on with the minutes.
pub fn hour_angle(hour: u8, minute: u8) -> f64 {
    let position = (hour % 12) as f64 + (minute % 60) as f64 / 60.0;
    position / 12.0 * TAU
}

pub fn minute_angle(minute: u8) -> f64 {
    (minute % 60) as f64 / 60.0 * TAU
}

/// Canvas coordinates of a hand of `length` pointing at `angle`
pub fn hand_tip(angle: f64, length: f64) -> (f64, f64) {
    (length * angle.sin(), length * angle.cos())
}

/// Analog clock drawn with braille dots
#[derive(Debug, Clone, Copy)]
pub struct ClockFace {
    hour: u8,
    minute: u8,
}

impl ClockFace {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

impl Widget for ClockFace {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        // a cell is roughly twice as tall as it is wide
        let aspect = area.width as f64 / (area.height as f64 * 2.0);
        let (minute_x, minute_y) = hand_tip(minute_angle(self.minute), MINUTE_HAND);
        let (hour_x, hour_y) = hand_tip(hour_angle(self.hour, self.minute), HOUR_HAND);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-BOUNDS * aspect, BOUNDS * aspect])
            .y_bounds([-BOUNDS, BOUNDS])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: RADIUS,
                    color: Color::White,
                });
                for hour in 1..=12u8 {
                    let (x, y) = hand_tip(hour_angle(hour, 0), LABEL_RADIUS);
                    ctx.print(x, y, hour.to_string());
                }
                ctx.layer();
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: minute_x,
                    y2: minute_y,
                    color: Color::Cyan,
                });
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: hour_x,
                    y2: hour_y,
                    color: Color::Yellow,
                });
            })
            .render(area, buf);
    }
}

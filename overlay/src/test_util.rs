//! Recording surface for layout tests
//!
//! Captures every primitive the draw code issues, with fixed-advance text
//! metrics (7px per char, 14px line height at scale 1.0) so expected
//! positions can be computed by hand.

use aurapane_core::TextMetrics;
use aurapane_core::metrics::MonospaceMetrics;
use tiny_skia::Color;

use crate::surface::{Corners, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedFill {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub radius: f32,
    pub color: Color,
    pub corners: Corners,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    RoundedFill(RoundedFill),
    Stroke { x: f32, y: f32, w: f32, h: f32, color: Color },
    Gradient { x: f32, y: f32, w: f32, h: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Text { text: String, x: f32, y: f32, scale: f32, color: Color },
}

#[derive(Debug)]
pub struct FakeSurface {
    pub primitives: Vec<Primitive>,
    metrics: MonospaceMetrics,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            metrics: MonospaceMetrics::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// All rounded fills, in draw order.
    pub fn rounded_fills(&self) -> Vec<RoundedFill> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::RoundedFill(fill) => Some(*fill),
                _ => None,
            })
            .collect()
    }

    /// All drawn strings, in draw order, shadow passes deduplicated.
    pub fn texts(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for p in &self.primitives {
            if let Primitive::Text { text, .. } = p {
                if out.last().map(String::as_str) != Some(text.as_str()) {
                    out.push(text.clone());
                }
            }
        }
        out
    }

    pub fn lines(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
            .count()
    }
}

impl TextMetrics for FakeSurface {
    fn measure_text(&mut self, text: &str, scale: f32) -> (f32, f32) {
        self.metrics.measure_text(text, scale)
    }
}

impl Surface for FakeSurface {
    fn fill_rounded_rect_corners(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        corners: Corners,
    ) {
        self.primitives.push(Primitive::RoundedFill(RoundedFill {
            x,
            y,
            w,
            h,
            radius,
            color,
            corners,
        }));
    }

    fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        _radius: f32,
        _stroke_width: f32,
        color: Color,
    ) {
        self.primitives.push(Primitive::Stroke { x, y, w, h, color });
    }

    fn fill_rect_gradient_v(&mut self, x: f32, y: f32, w: f32, h: f32, _top: Color, _bottom: Color) {
        self.primitives.push(Primitive::Gradient { x, y, w, h });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, _width: f32, _color: Color) {
        self.primitives.push(Primitive::Line { x1, y1, x2, y2 });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, scale: f32, color: Color) {
        self.primitives.push(Primitive::Text {
            text: text.to_string(),
            x,
            y,
            scale,
            color,
        });
    }
}

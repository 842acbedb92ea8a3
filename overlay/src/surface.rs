//! Drawing backend boundary
//!
//! The host owns the real draw list; the panel issues primitives through
//! this trait and never touches pixels. Text measurement comes with it
//! (backends shape text, so they are the authority on extents), which is
//! why [`Surface`] extends [`TextMetrics`].

use aurapane_core::TextMetrics;
use tiny_skia::Color;

/// Which ends of a rounded rect actually get rounded corners.
///
/// The two-segment health bar rounds only its outer ends: the left cap on
/// the health segment, the right cap on the shield segment, and nothing at
/// the seam between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub left: bool,
    pub right: bool,
}

impl Corners {
    pub const ALL: Corners = Corners { left: true, right: true };
    pub const LEFT: Corners = Corners { left: true, right: false };
    pub const RIGHT: Corners = Corners { left: false, right: true };
    pub const NONE: Corners = Corners { left: false, right: false };
}

/// Immediate-mode drawing primitives the panel needs.
///
/// Coordinates are overlay screen space, pixels, y-down. `scale` on text is
/// the same scale factor fed to `measure_text`.
pub trait Surface: TextMetrics {
    /// Filled rounded rectangle with selected corner caps.
    fn fill_rounded_rect_corners(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        corners: Corners,
    );

    /// Filled rounded rectangle, all corners.
    fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        self.fill_rounded_rect_corners(x, y, w, h, radius, color, Corners::ALL);
    }

    /// Rounded rectangle outline.
    fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        stroke_width: f32,
        color: Color,
    );

    /// Vertical gradient fill, `top` color fading to `bottom`.
    fn fill_rect_gradient_v(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color);

    /// Straight line segment.
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color);

    /// Text at a top-left position.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, scale: f32, color: Color);
}

/// Draw text with a full surrounding dark glow for readability.
///
/// Renders the text at all 8 cardinal/diagonal offsets in the shadow color,
/// then the real text on top.
pub fn draw_text_glowed<S: Surface>(
    surface: &mut S,
    text: &str,
    x: f32,
    y: f32,
    scale: f32,
    color: Color,
) {
    let shadow = crate::widgets::colors::text_shadow();
    let d = 1.0_f32;
    for &(dx, dy) in &[
        (-d, -d),
        (0.0, -d),
        (d, -d),
        (-d, 0.0),
        (d, 0.0),
        (-d, d),
        (0.0, d),
        (d, d),
    ] {
        surface.draw_text(text, x + dx, y + dy, scale, shadow);
    }
    surface.draw_text(text, x, y, scale, color);
}

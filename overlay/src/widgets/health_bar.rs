//! Two-segment pool bar
//!
//! One bar showing health and shield as adjacent fills over a shared
//! background. Segment widths are proportional to each pool's share of the
//! combined maximum, so a monster that is half health and half shield reads
//! as one continuous resource. Only the outer ends get rounded caps; the
//! seam between the segments stays square.

use aurapane_core::snapshot::ResourcePool;
use aurapane_types::{PanelConfig, formatting};
use tiny_skia::Color;

use crate::surface::{Corners, Surface, draw_text_glowed};
use crate::widgets::colors;

/// A health + shield bar for one entity.
#[derive(Debug, Clone, Copy)]
pub struct HealthBar {
    health: ResourcePool,
    shield: ResourcePool,
}

impl HealthBar {
    pub fn new(health: ResourcePool, shield: ResourcePool) -> Self {
        Self { health, shield }
    }

    /// Combined maximum, floored at 1 so fractions never divide by zero.
    pub fn pool_max(&self) -> i32 {
        (self.health.max_clamped() + self.shield.max_clamped()).max(1)
    }

    /// Combined current, clamped into `0..=pool_max`.
    pub fn pool_current(&self) -> i32 {
        (self.health.current_clamped() + self.shield.current_clamped()).clamp(0, self.pool_max())
    }

    /// Render the bar at `(x, y)` spanning `width`.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
        config: &PanelConfig,
    ) {
        let height = config.bar_height;
        let radius = config.bar_corner_radius;
        let pool_max = self.pool_max() as f32;

        surface.fill_rounded_rect(x, y, width, height, radius, colors::color_from_rgba(config.bar_bg));

        let health_frac = (self.health.current_clamped() as f32 / pool_max).clamp(0.0, 1.0);
        let shield_frac = (self.shield.current_clamped() as f32 / pool_max).clamp(0.0, 1.0);
        let health_w = width * health_frac;
        let shield_w = width * shield_frac;

        if health_w > 0.5 {
            let corners = if shield_w <= 0.5 { Corners::ALL } else { Corners::LEFT };
            surface.fill_rounded_rect_corners(
                x,
                y,
                health_w,
                height,
                radius,
                colors::color_from_rgba(config.bar_health_fill),
                corners,
            );
        }

        if shield_w > 0.5 {
            let start_x = x + health_w.max(0.0);
            let w = shield_w.min(x + width - start_x);
            let corners = if health_w <= 0.5 { Corners::ALL } else { Corners::RIGHT };
            surface.fill_rounded_rect_corners(
                start_x,
                y,
                w,
                height,
                radius,
                colors::color_from_rgba(config.bar_shield_fill),
                corners,
            );

            if config.fancy_shield_divider && health_w > 0.5 {
                let seam = x + health_w;
                let divider = Color::from_rgba8(0, 0, 0, config.shield_divider_alpha);
                surface.draw_line(seam, y + 1.0, seam, y + height - 1.0, 1.0, divider);
            }
        }

        if config.fancy_bar_inner_border && config.bar_inner_border_alpha > 0 {
            let alpha = (config.bar_inner_border_alpha as f32 * 0.15) as u8;
            let border = Color::from_rgba8(255, 255, 255, alpha);
            surface.stroke_rounded_rect(x, y, width, height, radius, 1.0, border);
        }

        if config.fancy_bar_gloss {
            let top = Color::from_rgba8(255, 255, 255, 31);
            let bottom = Color::from_rgba8(255, 255, 255, 5);
            surface.fill_rect_gradient_v(x, y, width, height * 0.55, top, bottom);
        }

        let label = if config.show_hp_percent {
            formatting::format_pct(self.pool_current() as f32 / pool_max)
        } else {
            formatting::format_compact(self.pool_current() as i64)
        };
        let (label_w, label_h) = surface.measure_text(&label, 1.0);
        let label_x = x + (width - label_w) * 0.5;
        let label_y = y + (height - label_h) * 0.5;
        draw_text_glowed(surface, &label, label_x, label_y, 1.0, colors::white());
    }
}

//! Status-effect chip packing and drawing
//!
//! Chips are variable-width rounded labels packed into rows no wider than
//! the panel content width. Packing is greedy best-fit: widest chip first,
//! each placed into the existing row that leaves the least space, opening a
//! new row only when none fits. Measuring and drawing share one layout
//! routine, so the height used to budget the panel always matches what the
//! draw pass consumes.
//!
//! Chips must have been through `buffs::populate_display` first; layout
//! reuses the stored footprint and only re-measures when a chip has to be
//! truncated to fit the row.

use aurapane_core::BuffChip;
use aurapane_core::TextMetrics;
use aurapane_core::buffs::{CHIP_PAD_X, CHIP_PAD_Y};
use aurapane_types::PanelConfig;
use tiny_skia::Color;

use crate::surface::Surface;
use crate::text::ellipsize_to_width;
use crate::widgets::colors;

/// Reorder chips into packed rows.
///
/// Output is rows in creation order, each row's chips in placement order.
/// A chip wider than the row is clipped to the row width rather than
/// rejected, so it always lands somewhere.
pub fn arrange(chips: Vec<BuffChip>, row_width: f32, pad: f32) -> Vec<BuffChip> {
    if chips.len() < 2 {
        return chips;
    }

    struct ChipRow {
        items: Vec<BuffChip>,
        used: f32,
    }

    let mut items = chips;
    items.sort_by(|a, b| {
        let wa = a.width.min(row_width);
        let wb = b.width.min(row_width);
        wb.partial_cmp(&wa).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rows: Vec<ChipRow> = Vec::new();
    for chip in items {
        let chip_width = chip.width.min(row_width);

        let mut best_index: Option<usize> = None;
        let mut best_leftover = f32::MAX;
        for (i, row) in rows.iter().enumerate() {
            let gap = if row.items.is_empty() { 0.0 } else { pad };
            let required = gap + chip_width;
            if row.used + required <= row_width {
                let leftover = row_width - (row.used + required);
                if leftover < best_leftover {
                    best_leftover = leftover;
                    best_index = Some(i);
                }
            }
        }

        match best_index {
            Some(i) => {
                let row = &mut rows[i];
                row.used += pad + chip_width;
                row.items.push(chip);
            }
            None => {
                rows.push(ChipRow {
                    used: chip_width,
                    items: vec![chip],
                });
            }
        }
    }

    rows.into_iter().flat_map(|row| row.items).collect()
}

/// Height the chips will consume at `row_width`, without drawing.
///
/// Agrees exactly with [`draw`] for the same inputs; both run the same
/// layout.
pub fn measure_height<M: TextMetrics>(
    chips: &[BuffChip],
    row_width: f32,
    config: &PanelConfig,
    metrics: &mut M,
) -> f32 {
    layout(chips, row_width, config, metrics).1
}

/// Draw the chips at `(x, y)`; returns the total height consumed.
pub fn draw<S: Surface>(
    surface: &mut S,
    x: f32,
    y: f32,
    chips: &[BuffChip],
    row_width: f32,
    config: &PanelConfig,
) -> f32 {
    let (placed, total_height) = layout(chips, row_width, config, surface);

    for item in &placed {
        let cx = x + item.dx;
        let cy = y + item.dy;
        let fill = chip_color(&item.name, config);
        let border = border_color(fill);
        let radius = config.chip_corner_radius;

        surface.fill_rounded_rect(cx, cy, item.w, item.h, radius, fill);

        if config.fancy_chip_gloss && config.chip_gloss_alpha > 0 {
            let top = Color::from_rgba8(255, 255, 255, config.chip_gloss_alpha);
            let bottom = Color::from_rgba8(255, 255, 255, 0);
            surface.fill_rect_gradient_v(cx, cy, item.w, item.h * 0.55, top, bottom);
        }

        surface.stroke_rounded_rect(cx, cy, item.w, item.h, radius, 1.0, border);
        surface.draw_text(
            &item.text,
            cx + 4.0,
            cy + 2.0,
            config.buff_text_scale,
            colors::white(),
        );
    }

    total_height
}

/// Background color for a chip name: explicit override when one matches,
/// otherwise a hue hashed from the seeded name so the same effect keeps the
/// same color all session.
pub fn chip_color(name: &str, config: &PanelConfig) -> Color {
    for entry in &config.chip_overrides {
        if entry.name.trim().eq_ignore_ascii_case(name.trim()) {
            return colors::color_from_rgb(entry.color, config.buff_bg_alpha);
        }
    }
    hash_color(name, config.chip_color_seed, config.buff_bg_alpha)
}

struct PlacedChip {
    name: String,
    text: String,
    dx: f32,
    dy: f32,
    w: f32,
    h: f32,
}

/// Row-wrapping layout shared by measure and draw. Offsets are relative to
/// the chip area origin.
fn layout<M: TextMetrics>(
    chips: &[BuffChip],
    row_width: f32,
    config: &PanelConfig,
    metrics: &mut M,
) -> (Vec<PlacedChip>, f32) {
    if chips.is_empty() {
        return (Vec::new(), 0.0);
    }

    let pad = config.buff_pad;
    let mut placed = Vec::with_capacity(chips.len());
    let mut x = 0.0_f32;
    let mut y = 0.0_f32;
    let mut tallest = 0.0_f32;

    for chip in chips {
        let (text, w, h) = fit_chip(chip, row_width, config, metrics);

        if x + w > row_width {
            x = 0.0;
            y += tallest + pad;
            tallest = 0.0;
        }

        placed.push(PlacedChip {
            name: chip.name.clone(),
            text,
            dx: x,
            dy: y,
            w,
            h,
        });

        tallest = tallest.max(h);
        x += w + pad;
    }

    (placed, y + tallest)
}

/// Resolve a chip's render text and footprint against the row width.
///
/// Chips that fit use their precomputed display and size untouched. For
/// oversized chips the stack/duration suffix is preserved and the base name
/// is ellipsized into the remaining space; if even the suffix alone cannot
/// fit, the suffix itself is ellipsized.
fn fit_chip<M: TextMetrics>(
    chip: &BuffChip,
    row_width: f32,
    config: &PanelConfig,
    metrics: &mut M,
) -> (String, f32, f32) {
    if chip.width <= row_width {
        return (chip.display.clone(), chip.width, chip.height);
    }

    let scale = config.buff_text_scale;
    let suffix = chip.suffix();

    if suffix.is_empty() {
        let text = ellipsize_to_width(metrics, &chip.name, row_width - CHIP_PAD_X, scale);
        let (w, h) = metrics.measure_text(&text, scale);
        return (text, (w + CHIP_PAD_X).min(row_width), h + CHIP_PAD_Y);
    }

    let suffix_width = metrics.measure_width(&suffix, scale);
    let available_for_name = row_width - CHIP_PAD_X - suffix_width;

    if available_for_name <= 0.0 {
        let text = ellipsize_to_width(metrics, &suffix, row_width - CHIP_PAD_X, scale);
        let (w, h) = metrics.measure_text(&text, scale);
        return (text, (w + CHIP_PAD_X).min(row_width), h + CHIP_PAD_Y);
    }

    let name_fit = ellipsize_to_width(metrics, &chip.name, available_for_name, scale);
    let text = format!("{name_fit}{suffix}");
    let (w, h) = metrics.measure_text(&text, scale);
    (text, (w + CHIP_PAD_X).min(row_width), h + CHIP_PAD_Y)
}

fn border_color(base: Color) -> Color {
    Color::from_rgba(
        base.red() * 0.55,
        base.green() * 0.55,
        base.blue() * 0.55,
        0.9,
    )
    .unwrap_or_else(|| Color::from_rgba8(0, 0, 0, 230))
}

/// Seeded FNV-1a over the uppercased name, mapped to a hue.
fn hash_color(name: &str, seed: i32, alpha: u8) -> Color {
    let mut hash: u32 = 2166136261;
    hash ^= seed as u32;
    hash = hash.wrapping_mul(16777619);
    for c in name.to_uppercase().chars() {
        hash ^= c as u32;
        hash = hash.wrapping_mul(16777619);
    }

    let hue = (hash % 360) as f32 / 360.0;
    let (r, g, b) = hsl_to_rgb(hue, 0.65, 0.50);
    Color::from_rgba8(
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
        alpha,
    )
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let a = s * l.min(1.0 - l);
    let f = |n: f32| {
        let k = (n + h * 12.0) % 12.0;
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    (f(0.0), f(8.0), f(4.0))
}

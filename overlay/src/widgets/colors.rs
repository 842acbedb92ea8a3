//! Color vocabulary for the panel

use aurapane_types::RarityTier;
use tiny_skia::Color;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Convert an RGB array plus explicit alpha to tiny_skia Color
#[inline]
pub fn color_from_rgb(rgb: [u8; 3], alpha: u8) -> Color {
    Color::from_rgba8(rgb[0], rgb[1], rgb[2], alpha)
}

pub fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

/// Dark shadow behind text for readability on arbitrary backgrounds
pub fn text_shadow() -> Color {
    Color::from_rgba8(0, 0, 0, 204)
}

/// Hairline separator under header/name rows
pub fn separator() -> Color {
    Color::from_rgba8(255, 255, 255, 20)
}

/// Name color per rarity tier
pub fn rarity_color(tier: RarityTier) -> Color {
    match tier {
        RarityTier::Normal => Color::from_rgba8(255, 255, 255, 255),
        RarityTier::Magic => Color::from_rgba8(77, 153, 255, 255),
        RarityTier::Rare => Color::from_rgba8(255, 255, 0, 255),
        RarityTier::Unique => Color::from_rgba8(255, 128, 0, 255),
    }
}

//! Panel configuration
//!
//! `PanelConfig` is the full settings surface consumed by the selector,
//! telemetry tracker, normalizer and panel renderer. It is loaded once,
//! treated as an immutable snapshot, and passed by reference into each
//! frame entry point. Nothing in the render path mutates it.

use serde::{Deserialize, Serialize};

/// Rarity classes in ascending order.
///
/// The derived `Ord` is load-bearing: `Normal < Magic < Rare < Unique` is
/// used both for the minimum-rarity filter and for selection priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum RarityTier {
    #[default]
    Normal,
    Magic,
    Rare,
    Unique,
}

impl RarityTier {
    /// All tiers, highest first. Selection walks this order.
    pub const DESCENDING: [RarityTier; 4] = [
        RarityTier::Unique,
        RarityTier::Rare,
        RarityTier::Magic,
        RarityTier::Normal,
    ];
}

/// Exact-match chip color override.
///
/// `name` is compared case-insensitively against the cleaned chip base name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipColorOverride {
    pub name: String,
    /// RGB; the chip background alpha from the config is applied on top.
    pub color: [u8; 3],
}

/// Full panel settings.
///
/// Defaults mirror the shipped configuration; colors are RGBA byte arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    // Filters
    pub draw_when_backgrounded: bool,
    /// "Nearby" in screen space, pixels from overlay center.
    pub screen_range_px: f32,
    pub max_enemies: usize,
    /// Show this rarity and above.
    pub min_rarity: RarityTier,

    // List anchor & spacing
    pub anchor: [f32; 2],
    pub entry_spacing: f32,
    pub bar_to_buff_spacing: f32,
    /// Vertical budget for the list; 0 = use overlay height.
    pub max_list_height: f32,

    /// Fixed content width.
    pub panel_width: f32,
    pub panel_right_safe_margin: f32,

    // Panel chrome
    pub show_panel_background: bool,
    pub panel_bg: [u8; 4],
    pub panel_border: [u8; 4],
    pub panel_padding: [f32; 2],
    pub panel_corner_radius: f32,

    // Fancy visuals
    pub fancy_panel_shadow: bool,
    pub fancy_rarity_stripe: bool,
    pub fancy_bar_gloss: bool,
    pub fancy_bar_inner_border: bool,
    pub fancy_shield_divider: bool,
    pub fancy_chip_gloss: bool,

    pub panel_shadow_size: f32,
    pub panel_shadow_alpha: u8,
    pub chip_corner_radius: f32,
    pub chip_gloss_alpha: u8,
    pub bar_corner_radius: f32,
    pub bar_inner_border_alpha: u8,
    pub shield_divider_alpha: u8,

    // Health bar (width always follows panel width)
    pub bar_bg: [u8; 4],
    pub bar_health_fill: [u8; 4],
    pub bar_shield_fill: [u8; 4],
    pub bar_height: f32,
    /// Percent label instead of absolute pool value.
    pub show_hp_percent: bool,

    // DPS telemetry
    pub show_dps: bool,
    pub show_overall_dps: bool,
    pub dps_smoothing_secs: f32,
    pub dps_text_color: [u8; 4],

    // Buff chips
    pub buff_pad: f32,
    pub max_buffs_per_enemy: usize,
    pub buff_bg_alpha: u8,
    pub buff_text_scale: f32,
    /// Finite durations only; indefinite effects never show a countdown.
    pub show_durations: bool,
    pub chip_color_seed: i32,
    pub chip_overrides: Vec<ChipColorOverride>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            draw_when_backgrounded: false,
            screen_range_px: 1800.0,
            max_enemies: 8,
            min_rarity: RarityTier::Magic,

            anchor: [250.0, 120.0],
            entry_spacing: 16.0,
            bar_to_buff_spacing: 3.0,
            max_list_height: 0.0,

            panel_width: 300.0,
            panel_right_safe_margin: 24.0,

            show_panel_background: true,
            panel_bg: [0, 0, 0, 90],
            panel_border: [0, 0, 0, 204],
            panel_padding: [8.0, 8.0],
            panel_corner_radius: 6.0,

            fancy_panel_shadow: true,
            fancy_rarity_stripe: true,
            fancy_bar_gloss: true,
            fancy_bar_inner_border: true,
            fancy_shield_divider: true,
            fancy_chip_gloss: true,

            panel_shadow_size: 10.0,
            panel_shadow_alpha: 64,
            chip_corner_radius: 6.0,
            chip_gloss_alpha: 64,
            bar_corner_radius: 5.0,
            bar_inner_border_alpha: 90,
            shield_divider_alpha: 191,

            bar_bg: [0, 0, 0, 128],
            bar_health_fill: [255, 90, 51, 255],
            bar_shield_fill: [0, 255, 255, 255],
            bar_height: 18.0,
            show_hp_percent: false,

            show_dps: true,
            show_overall_dps: true,
            dps_smoothing_secs: 1.5,
            dps_text_color: [255, 230, 150, 255],

            buff_pad: 2.0,
            max_buffs_per_enemy: 12,
            buff_bg_alpha: 90,
            buff_text_scale: 1.0,
            show_durations: true,
            chip_color_seed: 0,
            chip_overrides: Vec::new(),
        }
    }
}

impl PanelConfig {
    /// Smoothing time constant with the floor applied.
    pub fn smoothing_tau(&self) -> f32 {
        self.dps_smoothing_secs.max(0.1)
    }
}

//! Status-effect normalization
//!
//! Raw effect identifiers from the host are internal names full of noise
//! tokens ("monster_buff_fire_aura_visual"). This module cleans them into
//! display names, merges duplicates, applies the duration display policy,
//! and sizes the resulting chips once so the packer never re-measures.

use hashbrown::HashMap;

use crate::metrics::TextMetrics;
use crate::snapshot::RawStatusEffect;

/// Tokens stripped from raw effect names, compared case-insensitively.
const STOP_WORDS: &[&str] = &[
    "visual", "visuals", "monster", "mod", "6B", "buff", "magic", "mob", "effect", "effects",
    "rare", "display", "not", "hidden", "epk", "rarity",
];

/// Horizontal padding added around chip text, pixels.
pub const CHIP_PAD_X: f32 = 8.0;
/// Vertical padding added around chip text, pixels.
pub const CHIP_PAD_Y: f32 = 4.0;

/// One normalized status effect, ready for packing.
///
/// `display`, `width` and `height` are filled by [`populate_display`];
/// until then they are empty/zero. Width and height include the chip
/// padding, so they are the chip's full packing footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct BuffChip {
    /// Cleaned, deduplicated display name.
    pub name: String,
    /// Merged stack count, always >= 1.
    pub stacks: u32,
    /// Remaining duration in seconds, when shown at all.
    pub duration_secs: Option<f32>,
    pub display: String,
    pub width: f32,
    pub height: f32,
}

impl BuffChip {
    /// Stack/duration suffix of the display text (" x3 (12s)"), or empty.
    pub fn suffix(&self) -> String {
        let mut suffix = String::new();
        if self.stacks > 1 {
            suffix.push_str(&format!(" x{}", self.stacks));
        }
        if let Some(secs) = self.duration_secs {
            suffix.push_str(&format!(" ({:.0}s)", secs));
        }
        suffix
    }

    /// Full display text: name + suffix.
    pub fn compose_display(&self) -> String {
        format!("{}{}", self.name, self.suffix())
    }
}

/// Normalize raw effects into chips.
///
/// Effects whose cleaned name is empty (or the literal "hidden") carry no
/// information and are dropped. Effects that clean to the same name merge:
/// stacks sum, and the duration keeps the larger of two finite values, or
/// whichever one is finite. Duration is recorded only when `show_durations`
/// is set and both remaining and total time are finite with remaining > 0;
/// indefinite effects never show a countdown.
pub fn extract(effects: &[RawStatusEffect], show_durations: bool) -> Vec<BuffChip> {
    // Keyed merge map; insertion order is preserved separately so output is
    // deterministic regardless of hash order.
    let mut merged: HashMap<String, (u32, Option<f32>)> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for effect in effects {
        let Some(cleaned) = clean_name(&effect.name) else {
            continue;
        };

        let stacks = effect.charges.max(1) as u32;
        let remaining_finite = effect.remaining_secs.is_finite();
        let total_finite = effect.total_secs.is_finite();
        let duration = (show_durations && remaining_finite && total_finite
            && effect.remaining_secs > 0.0)
            .then_some(effect.remaining_secs);

        match merged.get_mut(&cleaned) {
            Some((prev_stacks, prev_duration)) => {
                *prev_stacks += stacks;
                *prev_duration = match (*prev_duration, duration) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
            }
            None => {
                merged.insert(cleaned.clone(), (stacks, duration));
                order.push(cleaned);
            }
        }
    }

    order
        .into_iter()
        .map(|name| {
            let (stacks, duration_secs) = merged[&name];
            BuffChip {
                name,
                stacks: stacks.max(1),
                duration_secs,
                display: String::new(),
                width: 0.0,
                height: 0.0,
            }
        })
        .collect()
}

/// Fill in display text and the measured, padded footprint for each chip.
///
/// Called once per frame before packing; the packer and the draw pass both
/// reuse these sizes.
pub fn populate_display<M: TextMetrics>(chips: &mut [BuffChip], scale: f32, metrics: &mut M) {
    for chip in chips {
        chip.display = chip.compose_display();
        let (w, h) = metrics.measure_text(&chip.display, scale);
        chip.width = w + CHIP_PAD_X;
        chip.height = h + CHIP_PAD_Y;
    }
}

/// Clean a raw effect name into a display name.
///
/// Separators become spaces, stop-word tokens are removed, whitespace is
/// collapsed, and the remaining words are title-cased (single-letter words
/// uppercased). Returns `None` for names that clean to nothing useful.
pub fn clean_name(raw: &str) -> Option<String> {
    let base = clean_base(raw)?;
    let titled = titleize(&base);
    if titled.eq_ignore_ascii_case("hidden") {
        return None;
    }
    Some(titled)
}

fn clean_base(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let spaced = raw.replace(['_', '-'], " ");
    let kept: Vec<&str> = spaced
        .split_whitespace()
        .filter(|word| !STOP_WORDS.iter().any(|stop| word.eq_ignore_ascii_case(stop)))
        .collect();

    if kept.is_empty() {
        return None;
    }
    Some(kept.join(" "))
}

fn titleize(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            if lower.chars().count() == 1 {
                lower.to_uppercase()
            } else {
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => lower,
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

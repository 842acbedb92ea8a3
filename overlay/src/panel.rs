//! Panel layout and frame driver
//!
//! `AuraPanel` is the once-per-frame entry point: it drains the area-change
//! signal, applies the draw gates, selects entities through the core, and
//! lays the survivors out as a fixed-width, dynamically-tall list. Entities
//! are admitted top to bottom until the next entry would overflow the
//! height budget; a partially drawn entry is never emitted.

use std::time::Instant;

use aurapane_core::selector::{self, SelectedEntity};
use aurapane_core::snapshot::{EntitySnapshot, ScreenPoint};
use aurapane_core::{AreaWatcher, BuffChip, TelemetryTracker};
use aurapane_types::{PanelConfig, RarityTier, formatting};
use tiny_skia::Color;

use crate::chips;
use crate::surface::{Surface, draw_text_glowed};
use crate::text::ellipsize_to_width;
use crate::widgets::{HealthBar, colors};

/// Gap between the name line and the health bar, pixels.
const NAME_TO_BAR_GAP: f32 = 2.0;
/// Extra space under the header text.
const HEADER_GAP: f32 = 2.0;
/// Content width floor; panels narrower than this are unreadable.
const MIN_CONTENT_WIDTH: f32 = 120.0;
/// Width of the rarity stripe on the panel's left edge.
const STRIPE_WIDTH: f32 = 3.0;

/// Everything the host hands over for one frame.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub snapshots: Vec<EntitySnapshot>,
    /// Overlay viewport size, pixels.
    pub overlay_size: (f32, f32),
    /// Frame timestamp; feeds telemetry so tests can fabricate time.
    pub now: Instant,
    /// Host process is the foreground window.
    pub foreground: bool,
    /// An obstructing host UI is open; nothing is drawn while true.
    pub host_ui_open: bool,
}

/// One admitted entity with its packed chips and planned heights.
struct PlannedRow {
    entry: SelectedEntity,
    chips: Vec<BuffChip>,
    dps: f32,
    name_height: f32,
    entry_height: f32,
}

impl PlannedRow {
    fn rarity(&self) -> RarityTier {
        self.entry.snapshot.rarity.unwrap_or(RarityTier::Normal)
    }
}

/// The aura panel: per-frame selection, telemetry and drawing.
pub struct AuraPanel {
    config: PanelConfig,
    tracker: TelemetryTracker,
    area: Option<AreaWatcher>,
}

impl AuraPanel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            tracker: TelemetryTracker::new(),
            area: None,
        }
    }

    /// Attach the area-change subscription drained at each frame start.
    pub fn with_area_watcher(mut self, watcher: AreaWatcher) -> Self {
        self.area = Some(watcher);
        self
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Replace the configuration snapshot.
    pub fn set_config(&mut self, config: PanelConfig) {
        self.config = config;
    }

    /// Number of entities with live telemetry state.
    pub fn tracked_entities(&self) -> usize {
        self.tracker.len()
    }

    /// Clear per-area state (telemetry baselines).
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Disable the overlay: abandon the area subscription and clear state.
    pub fn disable(&mut self) {
        self.area = None;
        self.tracker.reset();
        tracing::info!("panel disabled, telemetry cleared");
    }

    /// Run one frame. Drawing nothing is always a valid, safe outcome.
    pub fn frame<S: Surface>(&mut self, input: &FrameInput, surface: &mut S) {
        // Area transitions clear telemetry even on frames that draw nothing,
        // so stale baselines never survive into the next area.
        if let Some(area) = self.area.as_mut() {
            if area.take_change() {
                self.tracker.reset();
            }
        }

        if input.host_ui_open {
            return;
        }
        if !input.foreground && !self.config.draw_when_backgrounded {
            return;
        }

        let center = ScreenPoint::new(input.overlay_size.0 * 0.5, input.overlay_size.1 * 0.5);
        let selection = selector::collect(&input.snapshots, &self.config, center, surface);
        if selection.is_empty() {
            return;
        }

        self.render(selection, input, surface);
    }

    fn render<S: Surface>(
        &mut self,
        selection: Vec<SelectedEntity>,
        input: &FrameInput,
        surface: &mut S,
    ) {
        let config = &self.config;
        let (overlay_w, overlay_h) = input.overlay_size;
        let anchor_x = config.anchor[0];
        let anchor_y = config.anchor[1];

        let max_width = overlay_w - anchor_x - config.panel_right_safe_margin;
        let content_width = config
            .panel_width
            .max(MIN_CONTENT_WIDTH)
            .min(max_width.max(MIN_CONTENT_WIDTH));

        // Telemetry updates for every selected entity, admitted or not:
        // an entity squeezed out by the height budget keeps its baseline.
        let rates: Vec<f32> = selection
            .iter()
            .map(|entry| {
                self.tracker.update(
                    entry.snapshot.id,
                    entry.snapshot.combined_pool(),
                    input.now,
                    config.dps_smoothing_secs,
                )
            })
            .collect();

        let may_show_header = config.show_overall_dps && selection.len() >= 2;
        let header_height = if may_show_header {
            let provisional: f32 = rates.iter().map(|r| r.max(0.0)).sum();
            surface.measure_text(&header_text(provisional), 1.0).1 + HEADER_GAP
        } else {
            0.0
        };

        let usable_max = if config.max_list_height <= 0.0 {
            overlay_h
        } else {
            config.max_list_height
        };

        // Admit entities until the next one would overflow the budget.
        let mut rows: Vec<PlannedRow> = Vec::new();
        let mut accumulated = header_height;
        for (entry, dps) in selection.into_iter().zip(rates) {
            let mut arranged = chips::arrange(entry.chips.clone(), content_width, config.buff_pad);
            arranged.truncate(config.max_buffs_per_enemy);

            let name_height = surface.measure_text(&entry.name, 1.0).1;
            let buff_height = chips::measure_height(&arranged, content_width, config, surface);
            let entry_height = name_height
                + NAME_TO_BAR_GAP
                + config.bar_height
                + config.bar_to_buff_spacing
                + buff_height
                + config.entry_spacing;

            if anchor_y + accumulated + entry_height > usable_max {
                break;
            }
            accumulated += entry_height;
            rows.push(PlannedRow {
                entry,
                chips: arranged,
                dps,
                name_height,
                entry_height,
            });
        }

        if rows.is_empty() {
            return;
        }

        let show_header = config.show_overall_dps && rows.len() >= 2;
        let total_dps: f32 = rows.iter().map(|row| row.dps.max(0.0)).sum();
        let rows_height: f32 = rows.iter().map(|row| row.entry_height).sum();
        let panel_height = rows_height + if show_header { header_height } else { 0.0 };

        if config.show_panel_background {
            self.draw_background(surface, content_width, panel_height, &rows);
        }

        let mut cursor_y = anchor_y;

        if show_header {
            let text = header_text(total_dps);
            let (text_w, text_h) = surface.measure_text(&text, 1.0);
            let text_x = anchor_x + content_width - text_w;
            draw_text_glowed(
                surface,
                &text,
                text_x,
                cursor_y,
                1.0,
                colors::color_from_rgba(config.dps_text_color),
            );

            let separator_y = cursor_y + text_h + 1.0;
            surface.draw_line(
                anchor_x,
                separator_y,
                anchor_x + content_width,
                separator_y,
                1.0,
                colors::separator(),
            );
            cursor_y += header_height;
        }

        for row in &rows {
            cursor_y = self.draw_row(surface, row, anchor_x, cursor_y, content_width);
        }
    }

    fn draw_background<S: Surface>(
        &self,
        surface: &mut S,
        content_width: f32,
        panel_height: f32,
        rows: &[PlannedRow],
    ) {
        let config = &self.config;
        let pad_x = config.panel_padding[0];
        let pad_y = config.panel_padding[1];
        let x = config.anchor[0] - pad_x;
        let y = config.anchor[1] - pad_y;
        let w = content_width + pad_x * 2.0;
        // The trailing entry spacing is dead space; the background stops
        // before it.
        let h = panel_height + pad_y * 2.0 - config.entry_spacing;
        let radius = config.panel_corner_radius;

        if config.fancy_panel_shadow && config.panel_shadow_size > 0.0 && config.panel_shadow_alpha > 0
        {
            let shadow = Color::from_rgba8(0, 0, 0, config.panel_shadow_alpha);
            for i in 0..4 {
                let grow = config.panel_shadow_size * (i + 1) as f32 / 4.0;
                surface.fill_rounded_rect(
                    x - grow,
                    y - grow,
                    w + grow * 2.0,
                    h + grow * 2.0,
                    radius + grow,
                    shadow,
                );
            }
        }

        surface.fill_rounded_rect(x, y, w, h, radius, colors::color_from_rgba(config.panel_bg));

        if config.fancy_rarity_stripe {
            let rarest = rows
                .iter()
                .map(PlannedRow::rarity)
                .max()
                .unwrap_or(RarityTier::Normal);
            let base = colors::rarity_color(rarest);
            let stripe =
                Color::from_rgba(base.red(), base.green(), base.blue(), 0.9).unwrap_or(base);
            surface.fill_rounded_rect(x, y, STRIPE_WIDTH, h, radius, stripe);
        }

        surface.stroke_rounded_rect(
            x,
            y,
            w,
            h,
            radius,
            1.0,
            colors::color_from_rgba(config.panel_border),
        );
    }

    /// Draw one entity entry; returns the cursor position below it.
    fn draw_row<S: Surface>(
        &self,
        surface: &mut S,
        row: &PlannedRow,
        x: f32,
        mut cursor_y: f32,
        content_width: f32,
    ) -> f32 {
        let config = &self.config;
        let snapshot = &row.entry.snapshot;

        let name = ellipsize_to_width(surface, &row.entry.name, content_width, 1.0);
        draw_text_glowed(
            surface,
            &name,
            x,
            cursor_y,
            1.0,
            colors::rarity_color(row.rarity()),
        );

        let separator_y = cursor_y + row.name_height + 1.0;
        surface.draw_line(
            x,
            separator_y,
            x + content_width,
            separator_y,
            1.0,
            colors::separator(),
        );
        cursor_y += row.name_height + NAME_TO_BAR_GAP;

        let bar = HealthBar::new(snapshot.health, snapshot.shield);
        bar.render(surface, x, cursor_y, content_width, config);

        if config.show_dps {
            let text = format!("DPS {}", formatting::format_rate(row.dps));
            let (text_w, text_h) = surface.measure_text(&text, 1.0);
            let text_x = x + content_width - text_w - 4.0;
            let text_y = cursor_y + (config.bar_height - text_h) * 0.5;
            draw_text_glowed(
                surface,
                &text,
                text_x,
                text_y,
                1.0,
                colors::color_from_rgba(config.dps_text_color),
            );
        }

        cursor_y += config.bar_height + config.bar_to_buff_spacing;

        let used = chips::draw(surface, x, cursor_y, &row.chips, content_width, config);
        cursor_y + used + config.entry_spacing
    }
}

fn header_text(total_dps: f32) -> String {
    format!("TOTAL DPS {} ", formatting::format_rate(total_dps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::FakeSurface;
    use aurapane_core::AreaSignal;
    use aurapane_core::snapshot::{
        EntityId, EntityKind, EntityState, EntitySubkind, RawStatusEffect, ResourcePool,
    };
    use std::time::Duration;

    fn monster(id: u64, rarity: RarityTier, x: f32, health: i32) -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId(id),
            is_valid: true,
            state: EntityState::Usable,
            kind: EntityKind::Monster,
            subkind: EntitySubkind::None,
            rarity: Some(rarity),
            path: format!("Metadata/Monsters/Mob{id}x"),
            screen_pos: ScreenPoint::new(x, 0.0),
            health: ResourcePool::new(health, 100),
            shield: ResourcePool::new(0, 0),
            effects: vec![RawStatusEffect::new("monster_buff_fire_aura", 1, 5.0, 10.0)],
        }
    }

    fn input(snapshots: Vec<EntitySnapshot>) -> FrameInput {
        FrameInput {
            snapshots,
            overlay_size: (1920.0, 1080.0),
            now: Instant::now(),
            foreground: true,
            host_ui_open: false,
        }
    }

    fn config() -> PanelConfig {
        PanelConfig {
            min_rarity: RarityTier::Normal,
            ..Default::default()
        }
    }

    #[test]
    fn obstructing_host_ui_suppresses_drawing() {
        let mut panel = AuraPanel::new(config());
        let mut surface = FakeSurface::new();
        let mut frame_input = input(vec![monster(1, RarityTier::Rare, 960.0, 100)]);
        frame_input.host_ui_open = true;
        panel.frame(&frame_input, &mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn background_process_suppresses_drawing_unless_allowed() {
        let mut panel = AuraPanel::new(config());
        let mut surface = FakeSurface::new();
        let mut frame_input = input(vec![monster(1, RarityTier::Rare, 960.0, 100)]);
        frame_input.foreground = false;
        panel.frame(&frame_input, &mut surface);
        assert!(surface.is_empty());

        let mut allowed = config();
        allowed.draw_when_backgrounded = true;
        let mut panel = AuraPanel::new(allowed);
        panel.frame(&frame_input, &mut surface);
        assert!(!surface.is_empty());
    }

    #[test]
    fn empty_selection_draws_nothing() {
        let mut panel = AuraPanel::new(config());
        let mut surface = FakeSurface::new();
        panel.frame(&input(vec![]), &mut surface);
        assert!(surface.is_empty());

        // Out of range is the same as absent.
        let far = monster(1, RarityTier::Rare, 50_000.0, 100);
        panel.frame(&input(vec![far]), &mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn renders_names_bars_and_chips() {
        let mut panel = AuraPanel::new(config());
        let mut surface = FakeSurface::new();
        panel.frame(
            &input(vec![monster(1, RarityTier::Rare, 960.0, 100)]),
            &mut surface,
        );

        let texts = surface.texts();
        assert!(texts.iter().any(|t| t == "Mob1x"), "texts: {texts:?}");
        assert!(texts.iter().any(|t| t == "Fire Aura (5s)"), "texts: {texts:?}");
        assert!(texts.iter().any(|t| t == "DPS 0"), "texts: {texts:?}");
        // One entity: no header.
        assert!(!texts.iter().any(|t| t.starts_with("TOTAL DPS")));
    }

    #[test]
    fn header_appears_with_two_entities() {
        let mut panel = AuraPanel::new(config());
        let mut surface = FakeSurface::new();
        panel.frame(
            &input(vec![
                monster(1, RarityTier::Rare, 960.0, 100),
                monster(2, RarityTier::Magic, 900.0, 100),
            ]),
            &mut surface,
        );
        assert!(surface.texts().iter().any(|t| t.starts_with("TOTAL DPS")));
    }

    #[test]
    fn header_can_be_disabled() {
        let mut cfg = config();
        cfg.show_overall_dps = false;
        let mut panel = AuraPanel::new(cfg);
        let mut surface = FakeSurface::new();
        panel.frame(
            &input(vec![
                monster(1, RarityTier::Rare, 960.0, 100),
                monster(2, RarityTier::Magic, 900.0, 100),
            ]),
            &mut surface,
        );
        assert!(!surface.texts().iter().any(|t| t.starts_with("TOTAL DPS")));
    }

    #[test]
    fn height_budget_truncates_the_list() {
        let mut cfg = config();
        cfg.show_overall_dps = false;
        // Anchor at 120 + one entry (~53px) fits; a second does not.
        cfg.max_list_height = 200.0;
        let mut panel = AuraPanel::new(cfg);
        let mut surface = FakeSurface::new();
        panel.frame(
            &input(vec![
                monster(1, RarityTier::Rare, 960.0, 100),
                monster(2, RarityTier::Magic, 900.0, 100),
            ]),
            &mut surface,
        );

        let texts = surface.texts();
        assert!(texts.iter().any(|t| t == "Mob1x"));
        assert!(!texts.iter().any(|t| t == "Mob2x"), "texts: {texts:?}");
    }

    #[test]
    fn dps_label_reflects_damage_between_frames() {
        let mut panel = AuraPanel::new(config());
        let mut surface = FakeSurface::new();
        let t0 = Instant::now();

        let mut first = input(vec![monster(1, RarityTier::Rare, 960.0, 100)]);
        first.now = t0;
        panel.frame(&first, &mut surface);

        let mut surface = FakeSurface::new();
        let mut second = input(vec![monster(1, RarityTier::Rare, 960.0, 40)]);
        second.now = t0 + Duration::from_secs(1);
        panel.frame(&second, &mut surface);

        let dps_text = surface
            .texts()
            .into_iter()
            .find(|t| t.starts_with("DPS "))
            .unwrap();
        assert_ne!(dps_text, "DPS 0");
    }

    #[test]
    fn area_change_clears_telemetry() {
        let signal = AreaSignal::new();
        let mut panel = AuraPanel::new(config()).with_area_watcher(signal.subscribe());
        let mut surface = FakeSurface::new();

        panel.frame(
            &input(vec![monster(1, RarityTier::Rare, 960.0, 100)]),
            &mut surface,
        );
        assert_eq!(panel.tracked_entities(), 1);

        signal.notify();
        // The reset happens at the next frame even if that frame is gated.
        let mut gated = input(vec![]);
        gated.host_ui_open = true;
        panel.frame(&gated, &mut surface);
        assert_eq!(panel.tracked_entities(), 0);
    }

    #[test]
    fn disable_clears_state_immediately() {
        let signal = AreaSignal::new();
        let mut panel = AuraPanel::new(config()).with_area_watcher(signal.subscribe());
        let mut surface = FakeSurface::new();
        panel.frame(
            &input(vec![monster(1, RarityTier::Rare, 960.0, 100)]),
            &mut surface,
        );
        assert_eq!(panel.tracked_entities(), 1);

        panel.disable();
        assert_eq!(panel.tracked_entities(), 0);
    }

    #[test]
    fn unique_beats_closer_rare_for_single_slot() {
        let mut cfg = config();
        cfg.max_enemies = 1;
        let mut panel = AuraPanel::new(cfg);
        let mut surface = FakeSurface::new();

        // Center is (960, 540): Rare 10px away, Unique 50px away.
        let mut rare = monster(1, RarityTier::Rare, 960.0, 100);
        rare.screen_pos = ScreenPoint::new(970.0, 540.0);
        let mut unique = monster(2, RarityTier::Unique, 960.0, 100);
        unique.screen_pos = ScreenPoint::new(1010.0, 540.0);

        panel.frame(&input(vec![rare, unique]), &mut surface);
        let texts = surface.texts();
        assert!(texts.iter().any(|t| t == "Mob2x"));
        assert!(!texts.iter().any(|t| t == "Mob1x"));
    }
}

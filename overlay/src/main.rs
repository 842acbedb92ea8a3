//! Demo driver for the aura panel
//!
//! Run with: cargo run -p aurapane-overlay
//!
//! Feeds two synthetic frames of entity snapshots through the panel against
//! a stats-collecting surface and logs what would be drawn. Useful for
//! eyeballing layout decisions without a host process attached.

use std::time::{Duration, Instant};

use aurapane_core::metrics::MonospaceMetrics;
use aurapane_core::snapshot::{
    EntityId, EntityKind, EntitySnapshot, EntitySource, EntityState, EntitySubkind,
    RawStatusEffect, ResourcePool, ScreenPoint,
};
use aurapane_core::{AreaSignal, TextMetrics, settings};
use aurapane_overlay::{AuraPanel, FrameInput, Surface, surface::Corners};
use aurapane_types::RarityTier;
use tiny_skia::Color;
use tracing_subscriber::filter::EnvFilter;

/// Surface that tallies primitives instead of rasterizing them.
#[derive(Default)]
struct StatsSurface {
    metrics: MonospaceMetrics,
    rects: usize,
    strokes: usize,
    gradients: usize,
    lines: usize,
    texts: usize,
}

impl TextMetrics for StatsSurface {
    fn measure_text(&mut self, text: &str, scale: f32) -> (f32, f32) {
        self.metrics.measure_text(text, scale)
    }
}

impl Surface for StatsSurface {
    fn fill_rounded_rect_corners(
        &mut self,
        _x: f32,
        _y: f32,
        _w: f32,
        _h: f32,
        _radius: f32,
        _color: Color,
        _corners: Corners,
    ) {
        self.rects += 1;
    }

    fn stroke_rounded_rect(
        &mut self,
        _x: f32,
        _y: f32,
        _w: f32,
        _h: f32,
        _radius: f32,
        _stroke_width: f32,
        _color: Color,
    ) {
        self.strokes += 1;
    }

    fn fill_rect_gradient_v(
        &mut self,
        _x: f32,
        _y: f32,
        _w: f32,
        _h: f32,
        _top: Color,
        _bottom: Color,
    ) {
        self.gradients += 1;
    }

    fn draw_line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _width: f32, _color: Color) {
        self.lines += 1;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _scale: f32, _color: Color) {
        self.texts += 1;
        tracing::debug!(text, x, y, "text");
    }
}

fn monster(
    id: u64,
    path: &str,
    rarity: RarityTier,
    pos: (f32, f32),
    health: i32,
    effects: Vec<RawStatusEffect>,
) -> EntitySnapshot {
    EntitySnapshot {
        id: EntityId(id),
        is_valid: true,
        state: EntityState::Usable,
        kind: EntityKind::Monster,
        subkind: EntitySubkind::None,
        rarity: Some(rarity),
        path: path.to_string(),
        screen_pos: ScreenPoint::new(pos.0, pos.1),
        health: ResourcePool::new(health, 4000),
        shield: ResourcePool::new(500, 500),
        effects,
    }
}

/// Stand-in for the host process: a fixed pair of nearby monsters whose
/// boss health can be ticked down between frames.
struct SyntheticWorld {
    boss_health: i32,
}

impl EntitySource for SyntheticWorld {
    fn awake_entities(&self) -> Vec<EntitySnapshot> {
        vec![
            monster(
                101,
                "Metadata/Monsters/AncientBoneLord",
                RarityTier::Unique,
                (1100.0, 500.0),
                self.boss_health,
                vec![
                    RawStatusEffect::new("monster_buff_fire_aura_visual", 1, 8.2, 12.0),
                    RawStatusEffect::new("frenzy_charges", 5, 14.0, 20.0),
                    RawStatusEffect::indefinite("monster_mod_arcane_shield", 1),
                ],
            ),
            monster(
                102,
                "Metadata/Monsters/CarrionQueen@7",
                RarityTier::Rare,
                (900.0, 560.0),
                2200,
                vec![RawStatusEffect::new("chilled_buff", 2, 3.0, 6.0)],
            ),
        ]
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let mut config = settings::load();
    config.min_rarity = RarityTier::Normal;

    let area = AreaSignal::new();
    let mut panel = AuraPanel::new(config).with_area_watcher(area.subscribe());
    let mut surface = StatsSurface::default();
    let mut world = SyntheticWorld { boss_health: 4000 };

    let t0 = Instant::now();
    let base = FrameInput {
        snapshots: world.awake_entities(),
        overlay_size: (1920.0, 1080.0),
        now: t0,
        foreground: true,
        host_ui_open: false,
    };
    panel.frame(&base, &mut surface);

    // Second frame one second later with the unique 800 health down.
    world.boss_health = 3200;
    let hit = FrameInput {
        snapshots: world.awake_entities(),
        now: t0 + Duration::from_secs(1),
        ..base
    };
    panel.frame(&hit, &mut surface);

    tracing::info!(
        rects = surface.rects,
        strokes = surface.strokes,
        gradients = surface.gradients,
        lines = surface.lines,
        texts = surface.texts,
        tracked = panel.tracked_entities(),
        "two frames rendered"
    );

    area.notify();
    let gated = FrameInput {
        snapshots: Vec::new(),
        now: t0 + Duration::from_secs(2),
        ..hit
    };
    panel.frame(&gated, &mut surface);
    tracing::info!(tracked = panel.tracked_entities(), "after area change");
}

//! Hostile entity selection
//!
//! Filters the raw per-frame snapshot down to valid hostile monsters in
//! range, then fills up to `max_count` slots tier by tier: all Uniques
//! (nearest first), then Rares, and so on. A rarer entity is never displaced
//! by a closer, lower-rarity one; proximity only breaks ties inside a tier.

use aurapane_types::{PanelConfig, RarityTier};
use hashbrown::HashSet;

use crate::buffs::{self, BuffChip};
use crate::metrics::TextMetrics;
use crate::snapshot::{EntityId, EntityKind, EntitySnapshot, EntityState, EntitySubkind, ScreenPoint};

/// One selected entity with its derived display data.
#[derive(Debug, Clone)]
pub struct SelectedEntity {
    pub snapshot: EntitySnapshot,
    pub name: String,
    pub name_width: f32,
    pub chips: Vec<BuffChip>,
}

/// Ordered selection: rarity descending, then id ascending.
pub type SelectionResult = Vec<SelectedEntity>;

/// Frame entry point: select entities and attach names and measured chips.
///
/// Names are measured at scale 1.0; chips at the configured buff text scale.
pub fn collect<M: TextMetrics>(
    snapshots: &[EntitySnapshot],
    config: &PanelConfig,
    center: ScreenPoint,
    metrics: &mut M,
) -> SelectionResult {
    select(
        snapshots,
        config.min_rarity,
        config.max_enemies,
        center,
        config.screen_range_px,
    )
    .into_iter()
    .map(|snapshot| {
        let mut chips = buffs::extract(&snapshot.effects, config.show_durations);
        buffs::populate_display(&mut chips, config.buff_text_scale, metrics);

        let name = snapshot.display_name();
        let name_width = metrics.measure_width(&name, 1.0);

        SelectedEntity {
            snapshot,
            name,
            name_width,
            chips,
        }
    })
    .collect()
}

/// Pick up to `max_count` entities, prioritized by rarity tier then
/// proximity to `center`.
///
/// Returned order is rarity descending then id ascending, a reproducible
/// rendering order independent of distance.
pub fn select(
    snapshots: &[EntitySnapshot],
    min_rarity: RarityTier,
    max_count: usize,
    center: ScreenPoint,
    range_px: f32,
) -> Vec<EntitySnapshot> {
    if max_count == 0 {
        return Vec::new();
    }

    // Filter, dropping duplicate ids (the source should not produce them,
    // but tolerate it by keeping one representative).
    let mut seen: HashSet<EntityId> = HashSet::new();
    let mut candidates: Vec<&EntitySnapshot> = Vec::new();
    for snapshot in snapshots {
        if !passes_filter(snapshot, min_rarity, center, range_px) {
            continue;
        }
        if seen.insert(snapshot.id) {
            candidates.push(snapshot);
        }
    }

    // Fill slots tier by tier, nearest first within a tier. Distance ties
    // keep encounter order (stable sort); not load-bearing.
    let mut selected: Vec<&EntitySnapshot> = Vec::new();
    for tier in RarityTier::DESCENDING {
        if selected.len() >= max_count {
            break;
        }
        let mut in_tier: Vec<&EntitySnapshot> = candidates
            .iter()
            .copied()
            .filter(|s| s.rarity == Some(tier))
            .collect();
        in_tier.sort_by(|a, b| {
            let da = a.screen_pos.distance_to(center);
            let db = b.screen_pos.distance_to(center);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        selected.extend(in_tier.into_iter().take(max_count - selected.len()));
    }

    selected.sort_by(|a, b| b.rarity.cmp(&a.rarity).then(a.id.cmp(&b.id)));
    selected.into_iter().cloned().collect()
}

fn passes_filter(
    snapshot: &EntitySnapshot,
    min_rarity: RarityTier,
    center: ScreenPoint,
    range_px: f32,
) -> bool {
    if !snapshot.is_valid {
        return false;
    }
    if matches!(
        snapshot.state,
        EntityState::Hidden | EntityState::Useless | EntityState::Friendly
    ) {
        return false;
    }
    if snapshot.kind != EntityKind::Monster {
        return false;
    }
    if matches!(
        snapshot.subkind,
        EntitySubkind::PlayerSelf | EntitySubkind::PlayerOther
    ) {
        return false;
    }
    // Missing rarity means the host could not read it; exclude rather than guess.
    let Some(rarity) = snapshot.rarity else {
        return false;
    };
    if rarity < min_rarity {
        return false;
    }
    snapshot.screen_pos.distance_to(center) <= range_px
}

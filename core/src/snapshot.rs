//! Per-frame entity view
//!
//! The host process owns the real entity/world objects; the core only ever
//! sees the narrow `EntitySnapshot` view captured once per frame, handed in
//! through the `EntitySource` capability. Nothing here holds references into
//! host memory; entities are identified by value, by `EntityId`.

use aurapane_types::RarityTier;

/// Opaque in-world entity identifier.
///
/// Stable for the entity's lifetime within one area instance. Identifiers
/// may be reused after an area transition; callers handle that by resetting
/// per-entity state on the area-change signal, not by comparing identities
/// across areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse host-reported entity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityState {
    #[default]
    Usable,
    Hidden,
    Useless,
    Friendly,
}

/// Broad entity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    #[default]
    Monster,
    Npc,
    Object,
    Player,
}

/// Finer classification below `EntityKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntitySubkind {
    #[default]
    None,
    PlayerSelf,
    PlayerOther,
}

/// A current/max resource pair (health or shield).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourcePool {
    pub current: i32,
    pub max: i32,
}

impl ResourcePool {
    pub fn new(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    /// Current value clamped to be non-negative.
    pub fn current_clamped(&self) -> i32 {
        self.current.max(0)
    }

    /// Max value clamped to be non-negative.
    pub fn max_clamped(&self) -> i32 {
        self.max.max(0)
    }
}

/// A status effect as reported by the host, before normalization.
///
/// `remaining_secs`/`total_secs` may be NaN or infinite, meaning the effect
/// is indefinite.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatusEffect {
    pub name: String,
    pub charges: i32,
    pub remaining_secs: f32,
    pub total_secs: f32,
}

impl RawStatusEffect {
    pub fn new(name: impl Into<String>, charges: i32, remaining_secs: f32, total_secs: f32) -> Self {
        Self {
            name: name.into(),
            charges,
            remaining_secs,
            total_secs,
        }
    }

    /// An effect with no finite duration.
    pub fn indefinite(name: impl Into<String>, charges: i32) -> Self {
        Self::new(name, charges, f32::INFINITY, f32::INFINITY)
    }
}

/// A point in overlay screen space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: ScreenPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Read-only view of one entity for the current frame.
///
/// `rarity` is `None` when the host could not provide it; such entities are
/// excluded rather than guessed at. `path` is the host's metadata path for
/// the entity, used only to derive a display name.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub is_valid: bool,
    pub state: EntityState,
    pub kind: EntityKind,
    pub subkind: EntitySubkind,
    pub rarity: Option<RarityTier>,
    pub path: String,
    pub screen_pos: ScreenPoint,
    pub health: ResourcePool,
    pub shield: ResourcePool,
    pub effects: Vec<RawStatusEffect>,
}

impl EntitySnapshot {
    /// Combined health + shield pool, each side clamped non-negative.
    pub fn combined_pool(&self) -> i32 {
        self.health.current_clamped() + self.shield.current_clamped()
    }

    /// Human-readable name derived from the metadata path.
    pub fn display_name(&self) -> String {
        display_name_from_path(&self.path).unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Injected host capability: the set of awake entities this frame.
///
/// The host adapter projects world positions to screen space before
/// building snapshots, so the core never needs the camera.
pub trait EntitySource {
    fn awake_entities(&self) -> Vec<EntitySnapshot>;
}

/// Derive a display name from an entity metadata path.
///
/// Takes the path tail, drops any `@`-suffix, splits CamelCase runs and
/// underscores into words, capitalizes the first letter, and strips a
/// trailing number group ("Metadata/Monsters/FireElemental@3" -> "Fire
/// Elemental"). Returns `None` when nothing displayable remains.
pub fn display_name_from_path(path: &str) -> Option<String> {
    let tail = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path);
    let tail = tail.split('@').next().unwrap_or(tail);
    let tail = tail.replace('_', " ");
    let tail = tail.trim();
    if tail.is_empty() {
        return None;
    }

    // Space out CamelCase runs, keeping existing spaces.
    let mut spaced = String::with_capacity(tail.len() * 2);
    for (i, c) in tail.chars().enumerate() {
        if i > 0 && c.is_uppercase() && !spaced.ends_with(' ') {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    let mut spaced = spaced.trim().to_string();

    if let Some(first) = spaced.chars().next() {
        if first.is_alphabetic() && first.is_lowercase() {
            let upper: String = first.to_uppercase().collect();
            spaced.replace_range(..first.len_utf8(), &upper);
        }
    }

    // Strip a trailing number group ("Goatman 2" -> "Goatman").
    let stripped = spaced
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim_end();
    let result = stripped.to_string();
    if result.is_empty() { None } else { Some(result) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_from_simple_path() {
        assert_eq!(
            display_name_from_path("Metadata/Monsters/FireElemental"),
            Some("Fire Elemental".to_string())
        );
    }

    #[test]
    fn display_name_strips_suffixes() {
        assert_eq!(
            display_name_from_path("Metadata/Monsters/BoneRhoa@12"),
            Some("Bone Rhoa".to_string())
        );
        assert_eq!(
            display_name_from_path("Metadata\\Monsters\\Goatman_Champion3"),
            Some("Goatman Champion".to_string())
        );
    }

    #[test]
    fn display_name_capitalizes_first_letter() {
        assert_eq!(
            display_name_from_path("monsters/direWolf"),
            Some("Dire Wolf".to_string())
        );
    }

    #[test]
    fn display_name_empty_path_is_none() {
        assert_eq!(display_name_from_path(""), None);
        assert_eq!(display_name_from_path("a/b/123"), None);
    }

    #[test]
    fn snapshot_falls_back_to_unknown() {
        let snap = EntitySnapshot {
            id: EntityId(1),
            is_valid: true,
            state: EntityState::Usable,
            kind: EntityKind::Monster,
            subkind: EntitySubkind::None,
            rarity: Some(RarityTier::Normal),
            path: String::new(),
            screen_pos: ScreenPoint::default(),
            health: ResourcePool::new(10, 10),
            shield: ResourcePool::default(),
            effects: vec![],
        };
        assert_eq!(snap.display_name(), "Unknown");
    }

    #[test]
    fn combined_pool_clamps_negatives() {
        let snap = EntitySnapshot {
            id: EntityId(1),
            is_valid: true,
            state: EntityState::Usable,
            kind: EntityKind::Monster,
            subkind: EntitySubkind::None,
            rarity: None,
            path: String::new(),
            screen_pos: ScreenPoint::default(),
            health: ResourcePool::new(-5, 100),
            shield: ResourcePool::new(30, 50),
            effects: vec![],
        };
        assert_eq!(snap.combined_pool(), 30);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }
}

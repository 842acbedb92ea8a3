pub mod buffs;
pub mod events;
pub mod metrics;
pub mod selector;
pub mod settings;
pub mod snapshot;
pub mod telemetry;

// Re-exports for convenience
pub use buffs::BuffChip;
pub use events::{AreaSignal, AreaWatcher};
pub use metrics::TextMetrics;
pub use selector::{SelectedEntity, SelectionResult};
pub use snapshot::{
    EntityId, EntityKind, EntitySnapshot, EntitySource, EntityState, EntitySubkind, RawStatusEffect,
    ResourcePool, ScreenPoint,
};
pub use telemetry::TelemetryTracker;

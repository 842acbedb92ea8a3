//! Per-entity damage telemetry
//!
//! Maintains one exponentially-smoothed pool-loss-per-second estimate per
//! entity identity across frames. Samples arrive at irregular intervals
//! (once per rendered frame, per visible entity), so the smoothing factor is
//! derived from the elapsed time rather than a fixed per-sample weight:
//! `alpha = 1 - exp(-dt/tau)`. The estimate decays continuously toward zero
//! through damage-free stretches and reacts within roughly `tau` seconds to
//! bursts.

use std::time::Instant;

use hashbrown::HashMap;

use crate::snapshot::EntityId;

/// Floor for the smoothing time constant, seconds.
const MIN_TAU_SECS: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
struct TelemetryState {
    last_pool: i32,
    last_seen: Instant,
    ema: f32,
}

/// Smoothed DPS estimation, keyed by entity identity.
///
/// State is created lazily on first observation and discarded wholesale by
/// [`reset`](Self::reset). Identities are only unique within one area
/// instance, so the caller must reset on area transitions or baselines from
/// a previous area would corrupt the first post-transition sample.
#[derive(Debug, Default)]
pub struct TelemetryTracker {
    states: HashMap<EntityId, TelemetryState>,
}

impl TelemetryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Discard all per-identity state.
    pub fn reset(&mut self) {
        if !self.states.is_empty() {
            tracing::debug!(entities = self.states.len(), "telemetry reset");
        }
        self.states.clear();
    }

    /// Observe an entity's combined pool and return its smoothed rate.
    ///
    /// The first observation of an identity stores a baseline and returns 0;
    /// no rate is computable without a prior sample. Pool increases (regen)
    /// count as zero damage, never negative. A repeat query at the same
    /// timestamp refreshes only the timestamp and returns the stored
    /// estimate unchanged.
    pub fn update(
        &mut self,
        id: EntityId,
        current_pool: i32,
        now: Instant,
        smoothing_secs: f32,
    ) -> f32 {
        let pool = current_pool.max(0);

        let Some(state) = self.states.get_mut(&id) else {
            self.states.insert(
                id,
                TelemetryState {
                    last_pool: pool,
                    last_seen: now,
                    ema: 0.0,
                },
            );
            return 0.0;
        };

        // Saturating elapsed tolerates non-monotonic clock inputs.
        let dt = now.saturating_duration_since(state.last_seen).as_secs_f32();
        state.last_seen = now;

        if dt > 0.0 {
            let delta = state.last_pool - pool;
            state.last_pool = pool;

            let sample = if delta > 0 { delta as f32 / dt } else { 0.0 };
            let tau = smoothing_secs.max(MIN_TAU_SECS);
            let alpha = 1.0 - (-dt / tau).exp();
            state.ema += alpha * (sample - state.ema);
        }

        state.ema
    }
}

use std::sync::atomic::{AtomicU32, Ordering};

use crate::params::{ParamId, WaveParams};

/// Lock-free holder for the live parameter set.
///
/// Each parameter is an `f32` stored as its bit pattern in an `AtomicU32`.
/// Writers (the tuning panel, or any other thread) update single scalars;
/// the frame loop reads a full `WaveParams` snapshot once per frame.
/// Scalars never tear. A snapshot taken during a burst of writes may mix
/// old and new values, which is harmless since every frame is recomputed.
#[derive(Debug)]
pub struct ParamStore {
    values: [AtomicU32; 7],
    defaults: WaveParams,
}

impl ParamStore {
    /// Create a store seeded with `initial` (sanitized). `reset` returns here.
    pub fn new(initial: WaveParams) -> Self {
        let initial = initial.sanitized();
        let values =
            std::array::from_fn(|i| AtomicU32::new(initial.get(ParamId::ALL[i]).to_bits()));
        Self {
            values,
            defaults: initial,
        }
    }

    pub fn get(&self, id: ParamId) -> f32 {
        f32::from_bits(self.values[id.index()].load(Ordering::Relaxed))
    }

    /// Store a value clamped into the parameter's range. Returns what was stored.
    pub fn set(&self, id: ParamId, value: f32) -> f32 {
        let clamped = id.range().clamp(value);
        if clamped != value {
            tracing::debug!(param = %id, value, clamped, "parameter clamped");
        }
        self.values[id.index()].store(clamped.to_bits(), Ordering::Relaxed);
        clamped
    }

    /// Move a parameter by whole slider steps, snapping to the step grid.
    pub fn nudge(&self, id: ParamId, steps: i32) -> f32 {
        let range = id.range();
        let target = range.snap(self.get(id) + steps as f32 * range.step);
        self.set(id, target)
    }

    /// Read every parameter into a plain value.
    pub fn snapshot(&self) -> WaveParams {
        let mut params = self.defaults;
        for id in ParamId::ALL {
            params.set(id, self.get(id));
        }
        params
    }

    /// Overwrite every parameter (each one clamped).
    pub fn replace(&self, params: &WaveParams) {
        for id in ParamId::ALL {
            self.set(id, params.get(id));
        }
    }

    /// Restore the values the store was created with.
    pub fn reset(&self) {
        let defaults = self.defaults;
        self.replace(&defaults);
        tracing::info!("parameters reset");
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new(WaveParams::default())
    }
}

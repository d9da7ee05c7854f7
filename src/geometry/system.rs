//! High-level spring system: current parameters, current geometry, and the
//! rebuild-or-tick decision between them.

use super::{build, tick_with, FrameDelta, GeometryStore};
use crate::audio::{AudioFrame, AudioSource};
use crate::params::{ParamChange, ParameterSet, SamplerConfig};

/// Owns the geometry for the last applied parameter snapshot
///
/// Rebuilds replace the whole store in one move, so a reader sees either the
/// old geometry or the new one, never a mix and never nothing. Both `apply`
/// and `tick` take `&mut self`, so a tick can never overlap a rebuild.
pub struct SpringSystem {
    store: GeometryStore,
    params: ParameterSet,
    sampler: SamplerConfig,
    ticks: u64,
}

impl SpringSystem {
    /// Create a system and build its first geometry
    pub fn new(params: ParameterSet, sampler: SamplerConfig) -> Self {
        let mut system = Self {
            store: GeometryStore::default(),
            params,
            sampler,
            ticks: 0,
        };
        system.rebuild();
        system
    }

    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Ticks run since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Adopt a new parameter snapshot, rebuilding if a structural field changed
    pub fn apply(&mut self, params: ParameterSet) -> ParamChange {
        let change = self.params.classify_change(&params);
        self.params = params;
        if change == ParamChange::Structural {
            self.rebuild();
        }
        change
    }

    /// Discard the current geometry and build it again from the parameters
    pub fn rebuild(&mut self) {
        let mut next = build(&self.params);
        next.generation = self.store.generation + 1;

        let previous = std::mem::replace(&mut self.store, next);
        tracing::debug!(
            "Rebuilt geometry generation {}: {} curves x {} nodes (replaced {} curves)",
            self.store.generation,
            self.params.num_curves,
            self.params.nodes_per_curve,
            previous.len()
        );
    }

    /// Animate one frame from an explicit audio frame
    pub fn tick(&mut self, frame: Option<&AudioFrame>) -> FrameDelta {
        self.ticks += 1;
        tick_with(&mut self.store, &self.params, frame, self.sampler)
    }

    /// Animate one frame from whatever the source has right now
    pub fn tick_from(&mut self, source: &mut dyn AudioSource) -> FrameDelta {
        let frame = source.latest_frame();
        self.tick(frame.as_ref())
    }
}

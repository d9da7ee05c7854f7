//! Configuration surface: validates edits and publishes whole snapshots.

use super::{ParamChange, ParamField, ParameterSet, PresetBook};
use crate::error::Result;

/// The only writer of parameter state
///
/// Every edit is validated as a complete candidate snapshot before it is
/// committed, so readers never observe a half-applied change.
#[derive(Debug, Clone)]
pub struct ParameterSurface {
    committed: ParameterSet,
    presets: PresetBook,
}

impl ParameterSurface {
    /// Start from the book's initial preset
    pub fn new(presets: PresetBook) -> Result<Self> {
        let committed = presets.initial()?;
        committed.validate()?;
        Ok(Self {
            committed,
            presets,
        })
    }

    /// Last committed snapshot
    pub fn snapshot(&self) -> ParameterSet {
        self.committed
    }

    pub fn presets(&self) -> &PresetBook {
        &self.presets
    }

    /// Change one field
    pub fn set(&mut self, field: ParamField, value: f32) -> Result<ParamChange> {
        let candidate = self.committed.with(field, value)?;
        Ok(self.publish(candidate))
    }

    /// Replace the whole snapshot
    pub fn commit(&mut self, params: ParameterSet) -> Result<ParamChange> {
        params.validate()?;
        Ok(self.publish(params))
    }

    /// Switch to a named preset
    pub fn load_preset(&mut self, name: &str) -> Result<ParamChange> {
        let params = self.presets.get(name)?;
        self.commit(params)
    }

    /// Save the committed snapshot under `name`
    pub fn remember_as(&mut self, name: &str) -> Result<()> {
        self.presets.remember(name, self.committed)
    }

    fn publish(&mut self, candidate: ParameterSet) -> ParamChange {
        let change = self.committed.classify_change(&candidate);
        if change != ParamChange::Unchanged {
            tracing::debug!("Parameters committed ({:?} change)", change);
        }
        self.committed = candidate;
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VizError;

    #[test]
    fn test_starts_from_initial_preset() {
        let surface = ParameterSurface::new(PresetBook::builtin()).unwrap();
        assert_eq!(surface.snapshot(), ParameterSet::default());
    }

    #[test]
    fn test_set_classifies_fields() {
        let mut surface = ParameterSurface::new(PresetBook::builtin()).unwrap();

        assert_eq!(
            surface.set(ParamField::CurveHeightScale, 50.0).unwrap(),
            ParamChange::Passive
        );
        assert_eq!(
            surface.set(ParamField::NodesPerCurve, 10.0).unwrap(),
            ParamChange::Structural
        );
        assert_eq!(
            surface.set(ParamField::NodesPerCurve, 10.0).unwrap(),
            ParamChange::Unchanged
        );
        assert_eq!(surface.snapshot().nodes_per_curve, 10);
        assert_eq!(surface.snapshot().curve_height_scale, 50.0);
    }

    #[test]
    fn test_rejected_edit_keeps_last_snapshot() {
        let mut surface = ParameterSurface::new(PresetBook::builtin()).unwrap();
        let before = surface.snapshot();

        assert!(matches!(
            surface.set(ParamField::NumCurves, 0.0),
            Err(VizError::InvalidParameter { .. })
        ));
        assert_eq!(surface.snapshot(), before);
    }

    #[test]
    fn test_load_preset_is_structural() {
        let mut surface = ParameterSurface::new(PresetBook::builtin()).unwrap();
        assert_eq!(
            surface.load_preset("Flower").unwrap(),
            ParamChange::Structural
        );
        assert_eq!(surface.snapshot().num_curves, 219);
        assert!(surface.load_preset("Missing").is_err());
    }

    #[test]
    fn test_remember_as() {
        let mut surface = ParameterSurface::new(PresetBook::builtin()).unwrap();
        surface.set(ParamField::SpiralPhase, 42.0).unwrap();
        surface.remember_as("Wide").unwrap();
        assert_eq!(surface.presets().get("Wide").unwrap().spiral_phase, 42.0);
    }
}

//! Per-frame audio-driven animation of curves and segments.

use std::f32::consts::{PI, TAU};

use super::{FrameDelta, GeometryStore};
use crate::audio::{band_energy_in, overall_energy, AudioFrame};
use crate::params::{ParameterSet, SamplerConfig};
use crate::spiral;

/// Added to the segment scale so a silent band never collapses to nothing
pub const SCALE_FLOOR: f32 = 0.01;

/// Segment spin per tick with no sound (radians)
pub const BASE_SPIN: f32 = 0.003;

/// Extra spin per tick at full overall volume (radians)
pub const VOLUME_SPIN: f32 = 0.01;

/// Animate `store` for one frame using the lower-half band sampler
pub fn tick(
    store: &mut GeometryStore,
    params: &ParameterSet,
    frame: Option<&AudioFrame>,
) -> FrameDelta {
    tick_with(store, params, frame, SamplerConfig::default())
}

/// Animate `store` for one frame
///
/// Curve `i` reads band `i` of `num_curves`. Each curve becomes a coil around
/// its (freshly recomputed) baseline whose height rises linearly from 0 at the
/// first node to `level * curve_height_scale` towards the last. Segments scale
/// with their band and spin faster with overall volume.
///
/// Point buffers are rewritten in place and never resized; a store built for
/// different counts is animated as far as it reaches.
pub fn tick_with(
    store: &mut GeometryStore,
    params: &ParameterSet,
    frame: Option<&AudioFrame>,
    sampler: SamplerConfig,
) -> FrameDelta {
    let volume_boost = overall_energy(frame);
    let spin = BASE_SPIN + VOLUME_SPIN * volume_boost;
    let mut dirty_curves = Vec::with_capacity(store.curves.len());

    for (i, (curve, segment)) in store
        .curves
        .iter_mut()
        .zip(store.segments.iter_mut())
        .enumerate()
    {
        let level = band_energy_in(sampler.region, frame, i, params.num_curves);
        let baseline = spiral::baseline(i, params);

        let nodes = curve.points.len() as f32;
        for (j, point) in curve.points.iter_mut().enumerate() {
            let progress = j as f32 / nodes;
            let phase = PI * params.curve_wave_frequency * progress;
            let wave_one = phase.sin() - 0.5;
            let wave_two = phase.cos() - 0.5;

            point.x = baseline.x + wave_one;
            point.y = level * params.curve_height_scale * progress;
            point.z = baseline.y + wave_two;
        }
        curve.baseline = baseline;
        curve.revision += 1;
        dirty_curves.push(i);

        segment.baseline = baseline;
        segment.scale.x = SCALE_FLOOR + level;
        segment.scale.y = SCALE_FLOOR + level;
        segment.scale.z = 1.0;
        segment.rotation = (segment.rotation + spin).rem_euclid(TAU);
    }

    FrameDelta {
        dirty_curves,
        volume_boost,
        generation: store.generation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build;
    use crate::params::BandRegion;

    #[test]
    fn test_single_node_curves_stay_flat() {
        let params = ParameterSet {
            num_curves: 4,
            nodes_per_curve: 1,
            curve_wave_frequency: 0.0,
            ..ParameterSet::default()
        };
        let mut store = build(&params);
        let loud = AudioFrame::filled(64, 255);

        for frame in [None, Some(&loud)] {
            tick(&mut store, &params, frame);
            for (i, curve) in store.curves.iter().enumerate() {
                assert_eq!(curve.points().len(), 1);
                let b = spiral::baseline(i, &params);
                // sin(0) - 0.5 and cos(0) - 0.5
                assert_eq!(curve.points()[0].y, 0.0);
                assert!((curve.points()[0].x - (b.x - 0.5)).abs() < 1e-6);
                assert!((curve.points()[0].z - (b.y + 0.5)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_no_audio_spins_at_base_rate() {
        let params = ParameterSet::default();
        let mut store = build(&params);

        for n in 1..=100 {
            let delta = tick(&mut store, &params, None);
            assert_eq!(delta.volume_boost, 0.0);
            for segment in &store.segments {
                assert!((segment.rotation - n as f32 * BASE_SPIN).abs() < 1e-5);
                assert!((segment.scale.x - 1.01).abs() < 1e-6);
                assert!((segment.scale.y - 1.01).abs() < 1e-6);
                assert_eq!(segment.scale.z, 1.0);
            }
        }
    }

    #[test]
    fn test_no_audio_uses_full_height() {
        let params = ParameterSet {
            nodes_per_curve: 10,
            curve_height_scale: 20.0,
            ..ParameterSet::default()
        };
        let mut store = build(&params);
        tick(&mut store, &params, None);

        let heights: Vec<f32> = store.curves[0].points().iter().map(|p| p.y).collect();
        for (j, h) in heights.iter().enumerate() {
            assert!((h - 20.0 * j as f32 / 10.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_height_follows_band_level() {
        let params = ParameterSet {
            num_curves: 2,
            nodes_per_curve: 4,
            curve_height_scale: 10.0,
            ..ParameterSet::default()
        };
        let mut store = build(&params);
        // Lower half [0, 0 | 255, 255], upper half ignored
        let frame = AudioFrame::new(vec![0, 0, 255, 255, 9, 9, 9, 9]);
        tick(&mut store, &params, Some(&frame));

        assert!(store.curves[0].points().iter().all(|p| p.y == 0.0));
        let tip = store.curves[1].points()[3].y;
        assert!((tip - 10.0 * 3.0 / 4.0).abs() < 1e-5);

        assert!((store.segments[0].scale.x - SCALE_FLOOR).abs() < 1e-6);
        assert!((store.segments[1].scale.x - (1.0 + SCALE_FLOOR)).abs() < 1e-6);
    }

    #[test]
    fn test_full_region_sampler() {
        let params = ParameterSet {
            num_curves: 2,
            nodes_per_curve: 2,
            ..ParameterSet::default()
        };
        let mut store = build(&params);
        let frame = AudioFrame::new(vec![0, 0, 255, 255]);
        let full = SamplerConfig {
            region: BandRegion::Full,
        };
        tick_with(&mut store, &params, Some(&frame), full);
        assert!((store.segments[1].scale.x - (1.0 + SCALE_FLOOR)).abs() < 1e-6);
    }

    #[test]
    fn test_loud_audio_spins_faster() {
        let params = ParameterSet::default();
        let mut store = build(&params);
        let loud = AudioFrame::filled(512, 255);

        let delta = tick(&mut store, &params, Some(&loud));
        assert_eq!(delta.volume_boost, 1.0);
        assert!((store.segments[0].rotation - (BASE_SPIN + VOLUME_SPIN)).abs() < 1e-6);
    }

    #[test]
    fn test_passive_params_apply_without_rebuild() {
        let params = ParameterSet::default();
        let mut store = build(&params);

        let moved = ParameterSet {
            spiral_radial_scale: 5.0,
            spiral_phase: 30.0,
            ..params
        };
        tick(&mut store, &moved, None);

        for (i, curve) in store.curves.iter().enumerate() {
            let b = spiral::baseline(i, &moved);
            assert_eq!(curve.baseline, b);
            assert_eq!(store.segments[i].baseline, b);
            // Node 0: sin(0) - 0.5, cos(0) - 0.5
            assert!((curve.points()[0].x - (b.x - 0.5)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_delta_marks_every_curve() {
        let params = ParameterSet {
            num_curves: 5,
            ..ParameterSet::default()
        };
        let mut store = build(&params);
        store.generation = 7;

        let delta = tick(&mut store, &params, None);
        assert_eq!(delta.dirty_curves, vec![0, 1, 2, 3, 4]);
        assert_eq!(delta.generation, 7);
        assert!(store.curves.iter().all(|c| c.revision() == 1));

        tick(&mut store, &params, None);
        assert!(store.curves.iter().all(|c| c.revision() == 2));
    }

    #[test]
    fn test_stale_store_is_not_resized() {
        let built_for = ParameterSet {
            num_curves: 3,
            nodes_per_curve: 5,
            ..ParameterSet::default()
        };
        let mut store = build(&built_for);
        let newer = ParameterSet {
            num_curves: 10,
            nodes_per_curve: 50,
            ..built_for
        };

        let delta = tick(&mut store, &newer, None);
        assert_eq!(delta.dirty_curves.len(), 3);
        assert!(store.curves.iter().all(|c| c.points().len() == 5));
    }

    #[test]
    fn test_empty_store_tick() {
        let mut store = GeometryStore::default();
        let delta = tick(&mut store, &ParameterSet::default(), None);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_spin_keeps_precision_over_long_runs() {
        let params = ParameterSet {
            num_curves: 1,
            ..ParameterSet::default()
        };
        let mut store = build(&params);
        // Far past where an unwrapped f32 angle stops advancing
        store.segments[0].rotation = 70_000.0;

        tick(&mut store, &params, None);
        let wrapped = store.segments[0].rotation;
        assert!((0.0..TAU).contains(&wrapped));

        for _ in 0..10 {
            let before = store.segments[0].rotation;
            tick(&mut store, &params, None);
            let advance = (store.segments[0].rotation - before).rem_euclid(TAU);
            assert!((advance - BASE_SPIN).abs() < 1e-5);
        }
    }

    #[test]
    fn test_spin_wraps_without_changing_orientation() {
        let params = ParameterSet {
            num_curves: 1,
            ..ParameterSet::default()
        };
        let mut store = build(&params);
        store.segments[0].rotation = TAU - 0.001;

        tick(&mut store, &params, None);
        let segment = &store.segments[0];
        assert!((segment.rotation - (BASE_SPIN - 0.001)).abs() < 1e-5);

        let unwrapped = crate::geometry::Segment {
            rotation: TAU - 0.001 + BASE_SPIN,
            ..segment.clone()
        };
        assert!(segment.orientation().abs_diff_eq(unwrapped.orientation(), 1e-5)
            || segment.orientation().abs_diff_eq(-unwrapped.orientation(), 1e-5));
    }
}

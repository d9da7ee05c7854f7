//! Scalar energy levels extracted from an audio frame.
//!
//! Both samplers normalize byte magnitudes to [0, 1] by dividing by 255.
//! A missing frame is not an error: `overall_energy` falls back to 0 (no
//! boost) and `band_energy` to 1 (full, neutral level).

use std::ops::Range;

use super::AudioFrame;
use crate::params::{audio_constants::MAX_MAGNITUDE, BandRegion};

/// Mean of every magnitude in the frame, normalized to [0, 1]
///
/// Returns 0 when no frame is available or the frame is empty.
pub fn overall_energy(frame: Option<&AudioFrame>) -> f32 {
    let Some(frame) = frame.filter(|f| !f.is_empty()) else {
        return 0.0;
    };
    mean(frame.magnitudes()) / MAX_MAGNITUDE
}

/// Energy of band `index` of `num_bands` over the lower half of the frame
pub fn band_energy(frame: Option<&AudioFrame>, index: usize, num_bands: usize) -> f32 {
    band_energy_in(BandRegion::default(), frame, index, num_bands)
}

/// Energy of band `index` of `num_bands` over `region` of the frame
///
/// Returns 1 when no frame is available or `num_bands` is 0, and 0 when the
/// region holds no bins. An out-of-range `index` reads the last band.
pub fn band_energy_in(
    region: BandRegion,
    frame: Option<&AudioFrame>,
    index: usize,
    num_bands: usize,
) -> f32 {
    let Some(frame) = frame else {
        return 1.0;
    };
    if num_bands == 0 {
        return 1.0;
    }

    let usable = region.usable_len(frame.len());
    if usable == 0 {
        return 0.0;
    }

    let window = band_window(usable, index.min(num_bands - 1), num_bands);
    mean(&frame.magnitudes()[window]) / MAX_MAGNITUDE
}

/// Bin range of band `index` when `usable` bins are split into `num_bands`
///
/// Bands are contiguous and disjoint and together cover `0..usable` exactly;
/// their sizes differ by at most one bin. When there are fewer bins than
/// bands, an empty band is widened to the single bin it starts at.
///
/// Callers must pass `usable > 0` and `index < num_bands`.
pub fn band_window(usable: usize, index: usize, num_bands: usize) -> Range<usize> {
    let start = index * usable / num_bands;
    let end = (index + 1) * usable / num_bands;
    if end > start {
        start..end
    } else {
        let bin = start.min(usable - 1);
        bin..bin + 1
    }
}

/// Raw (unnormalized) magnitude sum of every band
pub fn band_totals(frame: &AudioFrame, num_bands: usize, region: BandRegion) -> Vec<u64> {
    let usable = region.usable_len(frame.len());
    if usable == 0 {
        return vec![0; num_bands];
    }
    (0..num_bands)
        .map(|index| {
            frame.magnitudes()[band_window(usable, index, num_bands)]
                .iter()
                .map(|&m| m as u64)
                .sum()
        })
        .collect()
}

fn mean(values: &[u8]) -> f32 {
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    sum as f32 / values.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overall_energy_bounds() {
        assert_eq!(overall_energy(None), 0.0);
        assert_eq!(overall_energy(Some(&AudioFrame::default())), 0.0);
        assert_eq!(overall_energy(Some(&AudioFrame::filled(512, 0))), 0.0);
        assert_eq!(overall_energy(Some(&AudioFrame::filled(512, 255))), 1.0);
    }

    #[test]
    fn test_overall_energy_is_mean() {
        let frame = AudioFrame::new(vec![0, 51, 102, 153]);
        assert!((overall_energy(Some(&frame)) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_band_energy_without_frame_is_neutral() {
        assert_eq!(band_energy(None, 0, 65), 1.0);
        assert_eq!(band_energy(None, 64, 65), 1.0);
    }

    #[test]
    fn test_band_energy_ignores_upper_half() {
        // Lower half silent, upper half loud
        let mut magnitudes = vec![0u8; 8];
        magnitudes[4..].fill(255);
        let frame = AudioFrame::new(magnitudes);

        for index in 0..4 {
            assert_eq!(band_energy(Some(&frame), index, 4), 0.0);
        }
        assert_eq!(band_energy_in(BandRegion::Full, Some(&frame), 3, 4), 1.0);
    }

    #[test]
    fn test_band_energy_window_means() {
        // Lower half: [10, 20 | 30, 40]
        let frame = AudioFrame::new(vec![10, 20, 30, 40, 0, 0, 0, 0]);
        assert!((band_energy(Some(&frame), 0, 2) - 15.0 / 255.0).abs() < 1e-6);
        assert!((band_energy(Some(&frame), 1, 2) - 35.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_more_bands_than_bins() {
        // Lower half has 2 bins, 5 bands requested
        let frame = AudioFrame::new(vec![51, 255, 0, 0]);
        let levels: Vec<f32> = (0..5).map(|i| band_energy(Some(&frame), i, 5)).collect();
        for level in &levels {
            assert!(level.is_finite());
            assert!((0.0..=1.0).contains(level));
        }
        assert_eq!(levels[0], 0.2);
        assert_eq!(levels[4], 1.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let tiny = AudioFrame::new(vec![255]);
        // Lower half of a one-bin frame is empty
        assert_eq!(band_energy(Some(&tiny), 0, 3), 0.0);
        assert_eq!(band_energy(Some(&tiny), 0, 0), 1.0);

        let frame = AudioFrame::filled(16, 255);
        assert_eq!(band_energy(Some(&frame), 99, 4), 1.0);
    }

    #[test]
    fn test_band_window_sizes() {
        // 10 bins into 4 bands: sizes 2, 3, 2, 3
        let windows: Vec<_> = (0..4).map(|i| band_window(10, i, 4)).collect();
        assert_eq!(windows, vec![0..2, 2..5, 5..7, 7..10]);
    }

    proptest! {
        #[test]
        fn bands_partition_lower_half(
            magnitudes in prop::collection::vec(any::<u8>(), 0..1024),
            num_bands in 1usize..64,
        ) {
            let frame = AudioFrame::new(magnitudes);
            let usable = frame.len() / 2;
            prop_assume!(usable >= num_bands);

            let totals = band_totals(&frame, num_bands, BandRegion::LowerHalf);
            let expected: u64 = frame.magnitudes()[..usable].iter().map(|&m| m as u64).sum();
            prop_assert_eq!(totals.iter().sum::<u64>(), expected);

            let mut next_start = 0;
            for index in 0..num_bands {
                let window = band_window(usable, index, num_bands);
                prop_assert_eq!(window.start, next_start);
                prop_assert!(window.end > window.start);
                next_start = window.end;
            }
            prop_assert_eq!(next_start, usable);
        }

        #[test]
        fn overall_energy_is_monotonic(
            magnitudes in prop::collection::vec(0u8..255, 1..512),
            bump_at in any::<prop::sample::Index>(),
        ) {
            let quiet = AudioFrame::new(magnitudes.clone());
            let mut louder = magnitudes;
            let i = bump_at.index(louder.len());
            louder[i] += 1;
            let louder = AudioFrame::new(louder);

            let a = overall_energy(Some(&quiet));
            let b = overall_energy(Some(&louder));
            prop_assert!(b > a);
            prop_assert!((0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&b));
        }

        #[test]
        fn band_energy_is_normalized(
            magnitudes in prop::collection::vec(any::<u8>(), 0..600),
            num_bands in 1usize..300,
            index in 0usize..300,
        ) {
            let frame = AudioFrame::new(magnitudes);
            let level = band_energy(Some(&frame), index, num_bands);
            prop_assert!((0.0..=1.0).contains(&level));
        }
    }
}

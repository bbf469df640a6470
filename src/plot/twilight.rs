//! Twilight bands: where the Sun stands below each threshold of [`TWILIGHT_THRESHOLDS`].
//!
//! | Threshold | Band                 | Color     |
//! |-----------|----------------------|-----------|
//! | 0°        | civil twilight       | `#65B4CF` |
//! | −6°       | nautical twilight    | `#316677` |
//! | −12°      | astronomical twilight| `#1B404D` |
//! | −18°      | night                | black     |
//!
//! Bands are stacked: every instant darker than −18° is also below −12°, so each mask is a
//! subset of the previous one and the darkest band ends up on top.
use itertools::Itertools;
use plotters::style::RGBColor;

use crate::constants::{Degree, TWILIGHT_THRESHOLDS};

/// Fill colors of the bands, same order as [`TWILIGHT_THRESHOLDS`]
pub const TWILIGHT_COLORS: [RGBColor; 4] = [
    RGBColor(0x65, 0xB4, 0xCF),
    RGBColor(0x31, 0x66, 0x77),
    RGBColor(0x1B, 0x40, 0x4D),
    RGBColor(0, 0, 0),
];

/// One shaded band of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TwilightBand {
    pub threshold: Degree,
    pub color: RGBColor,
    pub mask: Vec<bool>,
}

/// `true` wherever the Sun is strictly below `threshold`.
pub fn below_threshold(sun_alt: &[Degree], threshold: Degree) -> Vec<bool> {
    sun_alt.iter().map(|alt| *alt < threshold).collect()
}

/// The four bands of the chart for a sampled solar altitude curve.
pub fn twilight_bands(sun_alt: &[Degree]) -> Vec<TwilightBand> {
    TWILIGHT_THRESHOLDS
        .iter()
        .zip(TWILIGHT_COLORS)
        .map(|(threshold, color)| TwilightBand {
            threshold: *threshold,
            color,
            mask: below_threshold(sun_alt, *threshold),
        })
        .collect()
}

/// Contiguous runs of `true` in `mask`, as `(x_start, x_end)` pairs taken on `x`.
///
/// A run covers the samples it contains, so a single isolated sample gives a zero width span.
pub fn mask_spans(x: &[f64], mask: &[bool]) -> Vec<(f64, f64)> {
    let runs = x.iter().zip(mask).chunk_by(|(_, inside)| **inside);

    (&runs)
        .into_iter()
        .filter(|(inside, _)| *inside)
        .filter_map(|(_, mut run)| {
            let (first, _) = run.next()?;
            let last = run.last().map_or(*first, |(x, _)| *x);
            Some((*first, last))
        })
        .collect()
}

#[cfg(test)]
mod twilight_test {
    use super::*;

    /// A Sun dipping to −20° at the middle of a 12 h window.
    fn sun_curve() -> (Vec<f64>, Vec<Degree>) {
        let hours: Vec<f64> = (0..=120).map(|i| -6.0 + i as f64 * 0.1).collect();
        let alt = hours.iter().map(|h| -20.0 + 0.75 * h * h).collect();
        (hours, alt)
    }

    #[test]
    fn test_thresholds_strictly_descending() {
        assert!(TWILIGHT_THRESHOLDS.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(TWILIGHT_THRESHOLDS.len(), TWILIGHT_COLORS.len());
    }

    #[test]
    fn test_masks_are_nested() {
        let (_, alt) = sun_curve();
        let bands = twilight_bands(&alt);
        assert_eq!(bands.len(), 4);

        for pair in bands.windows(2) {
            let (outer, inner) = (&pair[0], &pair[1]);
            assert!(inner
                .mask
                .iter()
                .zip(&outer.mask)
                .all(|(i, o)| !*i || *o));
            let count = |mask: &[bool]| mask.iter().filter(|m| **m).count();
            assert!(count(&inner.mask) <= count(&outer.mask));
        }

        // the night band is not empty for this curve
        assert!(bands[3].mask.iter().any(|m| *m));
        assert_eq!(bands[3].color, RGBColor(0, 0, 0));
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(below_threshold(&[0.0, -0.1, 1.0], 0.0), vec![false, true, false]);
    }

    #[test]
    fn test_mask_spans() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mask = [true, true, false, true, false, false, true];
        assert_eq!(mask_spans(&x, &mask), vec![(0.0, 1.0), (3.0, 3.0), (6.0, 6.0)]);

        assert!(mask_spans(&x, &[false; 7]).is_empty());
        assert_eq!(mask_spans(&x, &[true; 7]), vec![(0.0, 6.0)]);
    }

    #[test]
    fn test_spans_of_a_symmetric_night() {
        let (hours, alt) = sun_curve();
        let bands = twilight_bands(&alt);

        // the dip is centered on zero: one span per band, symmetric around midnight
        for band in &bands {
            let spans = mask_spans(&hours, &band.mask);
            assert_eq!(spans.len(), 1);
            let (start, end) = spans[0];
            assert!((start + end).abs() < 0.11);
        }
    }
}

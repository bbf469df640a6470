//! # Visibility chart
//!
//! The chart is built in two steps:
//!
//! ```text
//! NightVisibility ──VisibilityFigure::build──► VisibilityFigure ──FigureWriter::write──► PNG
//!   (samples)          (pure, testable)          (series, bands)      (plotters backend)
//! ```
//!
//! [`NightVisibility`] holds the sampled altitudes and azimuths of the night, the figure is
//! a plain description of what to draw, and only the writer touches the filesystem.
pub mod figure;
pub mod render;
pub mod twilight;

use crate::{
    constants::{Degree, TWILIGHT_THRESHOLDS},
    coordinates::AltAz,
};

pub use figure::VisibilityFigure;
pub use render::{FigureWriter, PngWriter};

/// Horizontal coordinates of the three objects over the night grid.
///
/// All vectors share the grid: `sun[i]`, `moon[i]` and `comet[i]` are taken at
/// `offset_hours[i]` hours from local midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct NightVisibility {
    pub object_label: String,
    pub timezone_label: String,
    pub offset_hours: Vec<f64>,
    pub sun: Vec<AltAz>,
    pub moon: Vec<AltAz>,
    pub comet: Vec<AltAz>,
}

impl NightVisibility {
    pub fn sun_altitudes(&self) -> Vec<Degree> {
        self.sun.iter().map(|p| p.alt).collect()
    }

    /// Highest point of the comet over the night, with its offset from midnight in hours.
    pub fn comet_max_altitude(&self) -> Option<(f64, AltAz)> {
        self.offset_hours
            .iter()
            .zip(&self.comet)
            .max_by(|(_, a), (_, b)| a.alt.total_cmp(&b.alt))
            .map(|(h, p)| (*h, *p))
    }

    /// Number of samples taken with the Sun below the astronomical night threshold.
    pub fn dark_samples(&self) -> usize {
        let night = TWILIGHT_THRESHOLDS[TWILIGHT_THRESHOLDS.len() - 1];
        self.sun.iter().filter(|p| p.alt < night).count()
    }
}

#[cfg(test)]
mod plot_test {
    use super::*;

    pub(crate) fn night() -> NightVisibility {
        let offset_hours: Vec<f64> = (-6..=6).map(f64::from).collect();
        let sun = offset_hours
            .iter()
            .map(|h| AltAz {
                alt: -20.0 + 0.75 * h * h,
                az: (360.0 + 15.0 * h).rem_euclid(360.0),
            })
            .collect();
        let moon = offset_hours
            .iter()
            .map(|h| AltAz {
                alt: 10.0 + 2.0 * h,
                az: 150.0 + 10.0 * h,
            })
            .collect();
        let comet = offset_hours
            .iter()
            .map(|h| AltAz {
                alt: 30.0 - (h - 1.0).abs() * 3.0,
                az: 300.0 + 5.0 * h,
            })
            .collect();

        NightVisibility {
            object_label: "C/2020 F3 NEOWISE".into(),
            timezone_label: "BST".into(),
            offset_hours,
            sun,
            moon,
            comet,
        }
    }

    #[test]
    fn test_comet_max_altitude() {
        let (hour, top) = night().comet_max_altitude().unwrap();
        assert_eq!(hour, 1.0);
        assert_eq!(top.alt, 30.0);
        assert_eq!(top.az, 305.0);
    }

    #[test]
    fn test_dark_samples() {
        // −20 + 0.75 h² < −18 for |h| ≤ 1
        assert_eq!(night().dark_samples(), 3);
    }

    #[test]
    fn test_empty_night() {
        let empty = NightVisibility {
            offset_hours: vec![],
            sun: vec![],
            moon: vec![],
            comet: vec![],
            ..night()
        };
        assert_eq!(empty.comet_max_altitude(), None);
        assert_eq!(empty.dark_samples(), 0);
    }
}

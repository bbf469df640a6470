//! # Run configuration
//!
//! Every value the chart depends on, gathered in one struct. [`NeowiseConfig::default`]
//! draws comet C/2020 F3 (NEOWISE) from central Scotland on British Summer Time.
use std::time::Duration;

use camino::Utf8PathBuf;

use crate::{
    constants::{
        Degree, Meter, GRID_SAMPLES, HALF_NIGHT_HOURS, HEIGHT, LATITUDE, LONGITUDE,
        NEOWISE_DESIGNATION, UTC_OFFSET,
    },
    env_state::DEFAULT_HTTP_TIMEOUT,
};

/// Observing site and local clock.
///
/// `utc_offset_hours` is fixed: the clock does not follow daylight saving changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub latitude: Degree,
    pub longitude: Degree,
    pub height: Meter,
    pub utc_offset_hours: f64,
    pub timezone_label: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            latitude: LATITUDE,
            longitude: LONGITUDE,
            height: HEIGHT,
            utc_offset_hours: UTC_OFFSET,
            timezone_label: "BST".into(),
        }
    }
}

/// Canvas and sampling of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub samples: usize,
    pub half_width_hours: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            width: 1024,
            height: 768,
            samples: GRID_SAMPLES,
            half_width_hours: HALF_NIGHT_HOURS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeowiseConfig {
    pub site: SiteConfig,
    /// MPC designation sent to the ephemeris service
    pub designation: String,
    /// Legend label of the comet
    pub object_label: String,
    /// Output file name prefix, the file is `{prefix}-YYYY-MM-DD.png`
    pub output_prefix: String,
    pub output_dir: Utf8PathBuf,
    pub plot: PlotConfig,
    pub http_timeout: Duration,
}

impl Default for NeowiseConfig {
    fn default() -> Self {
        NeowiseConfig {
            site: SiteConfig::default(),
            designation: NEOWISE_DESIGNATION.into(),
            object_label: "C/2020 F3 NEOWISE".into(),
            output_prefix: "neowise".into(),
            output_dir: Utf8PathBuf::from("."),
            plot: PlotConfig::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NeowiseConfig::default();

        assert_eq!(config.site.latitude, 56.15);
        assert_eq!(config.site.longitude, -3.74);
        assert_eq!(config.site.utc_offset_hours, 1.0);
        assert_eq!(config.site.timezone_label, "BST");
        assert_eq!(config.designation, "C/2020 F3");
        assert_eq!(config.object_label, "C/2020 F3 NEOWISE");
        assert_eq!(config.output_prefix, "neowise");
        assert_eq!(config.output_dir, Utf8PathBuf::from("."));
        assert_eq!(config.plot.samples, 1000);
        assert_eq!(config.plot.half_width_hours, 6.0);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }
}

//! Description of the visibility chart, independent of any drawing backend.
use plotters::style::RGBColor;

use crate::{
    config::PlotConfig,
    constants::Degree,
    coordinates::AltAz,
    plot::{
        twilight::{mask_spans, twilight_bands},
        NightVisibility,
    },
};

/// Sun curve color, matplotlib `y`
pub const SUN_COLOR: RGBColor = RGBColor(191, 191, 0);
/// Moon curve color, 75% gray
pub const MOON_COLOR: RGBColor = RGBColor(191, 191, 191);

/// Marker radius of the comet samples, pixels
pub const COMET_MARKER_SIZE: i32 = 2;

/// Number of color steps of the color bar
const COLORBAR_STEPS: usize = 256;

/// Limits of the altitude axis
const ALTITUDE_RANGE: (Degree, Degree) = (0.0, 90.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// A labeled polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub color: RGBColor,
    pub style: LineStyle,
    pub points: Vec<(f64, f64)>,
}

/// A labeled point cloud, one color per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub colors: Vec<RGBColor>,
    pub marker_size: i32,
}

/// A shaded vertical band covering the y range over each x span.
#[derive(Debug, Clone, PartialEq)]
pub struct FillRegion {
    pub threshold: Degree,
    pub color: RGBColor,
    pub spans: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
}

/// Color scale of the scatter values, `stops[0]` at `min` and the last stop at `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBar {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub stops: Vec<RGBColor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_ticks: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
}

/// Everything the chart shows.
///
/// Fill regions are drawn first, in order, then the curves and the scatter on top of them.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityFigure {
    pub width: u32,
    pub height: u32,
    pub axes: Axes,
    pub fills: Vec<FillRegion>,
    pub curves: Vec<Curve>,
    pub scatters: Vec<Scatter>,
    pub legend: Option<LegendPosition>,
    pub colorbar: Option<ColorBar>,
}

impl VisibilityFigure {
    /// Assemble the chart of one night.
    ///
    /// Arguments
    /// ---------
    /// * `night`: sampled positions of the Sun, the Moon and the comet
    /// * `config`: canvas size and time window
    ///
    /// Return
    /// ------
    /// * Two dashed curves (Sun, Moon), the comet scatter colored by azimuth, four twilight
    ///   bands, the legend and the azimuth color bar.
    pub fn build(night: &NightVisibility, config: &PlotConfig) -> Self {
        let hours = &night.offset_hours;
        let along = |values: &[AltAz]| -> Vec<(f64, f64)> {
            hours.iter().zip(values).map(|(h, p)| (*h, p.alt)).collect()
        };

        let curves = vec![
            Curve {
                label: "Sun".into(),
                color: SUN_COLOR,
                style: LineStyle::Dashed,
                points: along(&night.sun),
            },
            Curve {
                label: "Moon".into(),
                color: MOON_COLOR,
                style: LineStyle::Dashed,
                points: along(&night.moon),
            },
        ];

        let azimuths: Vec<Degree> = night.comet.iter().map(|p| p.az).collect();
        let (az_min, az_max) = value_range(&azimuths);
        let scatter = Scatter {
            label: night.object_label.clone(),
            points: along(&night.comet),
            colors: azimuths
                .iter()
                .map(|az| colormap(normalize(*az, az_min, az_max)))
                .collect(),
            marker_size: COMET_MARKER_SIZE,
        };

        let fills = twilight_bands(&night.sun_altitudes())
            .into_iter()
            .map(|band| FillRegion {
                threshold: band.threshold,
                color: band.color,
                spans: mask_spans(hours, &band.mask),
            })
            .collect();

        let colorbar = ColorBar {
            label: "Azimuth [deg]".into(),
            min: az_min,
            max: az_max,
            stops: (0..COLORBAR_STEPS)
                .map(|i| colormap(i as f64 / (COLORBAR_STEPS - 1) as f64))
                .collect(),
        };

        let half = config.half_width_hours;
        VisibilityFigure {
            width: config.width,
            height: config.height,
            axes: Axes {
                x_range: (-half, half),
                y_range: ALTITUDE_RANGE,
                x_ticks: integer_ticks(-half, half),
                x_label: format!("Hours from {} Midnight", night.timezone_label),
                y_label: "Altitude [deg]".into(),
            },
            fills,
            curves,
            scatters: vec![scatter],
            legend: Some(LegendPosition::UpperLeft),
            colorbar: Some(colorbar),
        }
    }
}

/// Cyclic colormap: azimuth 0° and 360° share the same hue.
fn colormap(t: f64) -> RGBColor {
    let color = colorous::SINEBOW.eval_continuous(t.clamp(0.0, 1.0));
    RGBColor(color.r, color.g, color.b)
}

/// `(min, max)` of the values, `(0, 0)` when there is none.
fn value_range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((*v, *v)),
            Some((lo, hi)) => Some((lo.min(*v), hi.max(*v))),
        })
        .unwrap_or((0.0, 0.0))
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}

fn integer_ticks(start: f64, end: f64) -> Vec<f64> {
    let first = start.ceil() as i64;
    let last = end.floor() as i64;
    (first..=last).map(|t| t as f64).collect()
}

//! # Sun and Moon
//!
//! Low precision analytical positions of the Sun and the Moon, good to a hundredth of a
//! degree for the Sun and a few tenths of a degree for the Moon over this century.
//! Both are geocentric and referred to the **mean ecliptic and equinox of date**.
//!
//! * Sun: Meeus, *Astronomical Algorithms*, ch. 25 (low accuracy), with the 20.5"
//!   aberration constant applied to the longitude.
//! * Moon: *Astronomical Almanac* low precision series for longitude, latitude and
//!   horizontal parallax; the distance follows from the parallax.
use hifitime::{Epoch, Unit};
use nalgebra::Vector3;

use crate::{
    constants::{AstronomicalUnit, Degree, ERAU, RADEG, T2000},
    coordinates::{SkyCoord, SkyPosition},
    ref_system::{radec_to_cartesian, rotpn, RefEpoch, RefSystem},
};

/// A body whose position is computed on the fly at each instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

/// Geocentric ecliptic coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    pub longitude: Degree,
    pub latitude: Degree,
    pub distance: AstronomicalUnit,
}

impl Body {
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
        }
    }

    /// Geocentric position at `epoch` in the mean ecliptic and equinox of date.
    pub fn ecliptic_position(&self, epoch: &Epoch) -> EclipticPosition {
        let t = (epoch.to_mjd_tt_days() - T2000) / 36525.0;
        match self {
            Body::Sun => sun_position(t),
            Body::Moon => moon_position(t),
        }
    }
}

impl EclipticPosition {
    /// Cartesian vector in the ecliptic frame, AU.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        radec_to_cartesian(self.longitude * RADEG, self.latitude * RADEG, self.distance)
    }
}

/// Heliocentric velocity of the Earth at `epoch` in the true equator and equinox of date,
/// AU/day.
///
/// Central difference of the solar position over one day. The Sun series carries a constant
/// aberration offset, which cancels out.
pub fn earth_velocity(epoch: &Epoch) -> Vector3<f64> {
    let half_step = Unit::Hour * 12_i64;
    let before = Body::Sun.ecliptic_position(&(*epoch - half_step)).to_cartesian();
    let after = Body::Sun.ecliptic_position(&(*epoch + half_step)).to_cartesian();

    // the Earth moves opposite to the geocentric Sun
    let velocity = (before - after) / (2.0 * half_step.to_unit(Unit::Day));

    let date = RefEpoch::Epoch(epoch.to_mjd_tt_days());
    rotpn(&RefSystem::Eclm(date), &RefSystem::Equt(date)) * velocity
}

impl SkyPosition for Body {
    fn sky_coord(&self, epoch: &Epoch) -> SkyCoord {
        let pos = self.ecliptic_position(epoch);
        SkyCoord::new(
            pos.longitude,
            pos.latitude,
            Some(pos.distance),
            RefSystem::Eclm(RefEpoch::Epoch(epoch.to_mjd_tt_days())),
        )
    }
}

#[inline]
fn sin_deg(x: Degree) -> f64 {
    (x * RADEG).sin()
}

#[inline]
fn cos_deg(x: Degree) -> f64 {
    (x * RADEG).cos()
}

/// Sun position, `t` in Julian centuries (TT) since J2000.
fn sun_position(t: f64) -> EclipticPosition {
    // geometric mean longitude and mean anomaly
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    // equation of the center
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * sin_deg(m)
        + (0.019993 - 0.000101 * t) * sin_deg(2.0 * m)
        + 0.000289 * sin_deg(3.0 * m);

    let true_longitude = l0 + c;
    let true_anomaly = m + c;
    let distance = 1.000001018 * (1.0 - e * e) / (1.0 + e * cos_deg(true_anomaly));

    EclipticPosition {
        longitude: (true_longitude - 0.00569).rem_euclid(360.0),
        latitude: 0.0,
        distance,
    }
}

/// Moon position, `t` in Julian centuries (TT) since J2000.
fn moon_position(t: f64) -> EclipticPosition {
    let longitude = 218.32 + 481267.881 * t + 6.29 * sin_deg(135.0 + 477198.87 * t)
        - 1.27 * sin_deg(259.3 - 413335.36 * t)
        + 0.66 * sin_deg(235.7 + 890534.22 * t)
        + 0.21 * sin_deg(269.9 + 954397.74 * t)
        - 0.19 * sin_deg(357.5 + 35999.05 * t)
        - 0.11 * sin_deg(186.5 + 966404.03 * t);

    let latitude = 5.13 * sin_deg(93.3 + 483202.02 * t) + 0.28 * sin_deg(228.2 + 960400.89 * t)
        - 0.28 * sin_deg(318.3 + 6003.15 * t)
        - 0.17 * sin_deg(217.6 - 407332.21 * t);

    let parallax = 0.9508
        + 0.0518 * cos_deg(135.0 + 477198.87 * t)
        + 0.0095 * cos_deg(259.3 - 413335.36 * t)
        + 0.0078 * cos_deg(235.7 + 890534.22 * t)
        + 0.0028 * cos_deg(269.9 + 954397.74 * t);

    EclipticPosition {
        longitude: longitude.rem_euclid(360.0),
        latitude,
        distance: ERAU / sin_deg(parallax),
    }
}

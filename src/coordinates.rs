//! # Sky coordinates and the local horizontal frame
//!
//! A [`SkyCoord`] is a direction (and optionally a distance) in one of the reference systems
//! of [`crate::ref_system`]. An [`AltAzFrame`] ties an [`Observer`] to a sequence of
//! observation instants and projects anything implementing [`SkyPosition`] onto the local
//! horizon at each of them.
//!
//! ## Projection
//!
//! ```text
//! SkyCoord(frame) ──rotpn──► Equt(of date) ──┬─ distance known: − observer ─────────► (α, δ)
//!                                             └─ direction only: annual aberration ──►   │
//!                        H = LAST − α ──► (alt, az) ◄────────────────────────────────────┘
//! ```
//!
//! * Altitude is measured in degrees above the geodetic horizon, without refraction.
//! * Azimuth is measured in degrees from North through East, in `[0, 360)`.
//! * Objects without distance are treated as infinitely far: no parallax correction, but
//!   their astrometric direction is shifted by the aberration of the Earth's orbital motion
//!   (up to 20.5"). The Sun series already carries its aberration.
use hifitime::Epoch;

use crate::{
    constants::{AstronomicalUnit, Degree, Radian, DPI, RADEG},
    observers::Observer,
    ref_system::{
        cartesian_to_radec, correct_aberration, radec_to_cartesian, rotpn, RefEpoch, RefSystem,
    },
    solar_system::earth_velocity,
};
use nalgebra::Vector3;

/// A position on the sky.
///
/// * `longitude`, `latitude`: degrees; right ascension and declination for the equatorial
///   systems, ecliptic longitude and latitude for `Eclm`.
/// * `distance`: geocentric distance in AU, when known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyCoord {
    pub longitude: Degree,
    pub latitude: Degree,
    pub distance: Option<AstronomicalUnit>,
    pub frame: RefSystem,
}

impl SkyCoord {
    pub fn new(
        longitude: Degree,
        latitude: Degree,
        distance: Option<AstronomicalUnit>,
        frame: RefSystem,
    ) -> Self {
        SkyCoord {
            longitude,
            latitude,
            distance,
            frame,
        }
    }

    /// A direction in the ICRS, taken as the mean equator and equinox of J2000.
    pub fn icrs(ra: Degree, dec: Degree) -> Self {
        SkyCoord::new(ra, dec, None, RefSystem::Equm(RefEpoch::J2000))
    }

    /// Cartesian vector in `self.frame`: AU if the distance is known, unit vector otherwise.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        radec_to_cartesian(
            self.longitude * RADEG,
            self.latitude * RADEG,
            self.distance.unwrap_or(1.0),
        )
    }
}

/// Anything that can give its geocentric position at a given instant.
pub trait SkyPosition {
    fn sky_coord(&self, epoch: &Epoch) -> SkyCoord;
}

/// A fixed point of the sky: the same coordinate at every instant.
impl SkyPosition for SkyCoord {
    fn sky_coord(&self, _epoch: &Epoch) -> SkyCoord {
        *self
    }
}

/// Horizontal coordinates, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltAz {
    pub alt: Degree,
    pub az: Degree,
}

/// Observer frame: a site and the instants at which it looks at the sky.
#[derive(Debug, Clone, PartialEq)]
pub struct AltAzFrame {
    observer: Observer,
    obstimes: Vec<Epoch>,
}

impl AltAzFrame {
    pub fn new(observer: Observer, obstimes: Vec<Epoch>) -> Self {
        AltAzFrame { observer, obstimes }
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn obstimes(&self) -> &[Epoch] {
        &self.obstimes
    }

    /// Project `target` at every instant of the frame, in order.
    pub fn transform<S: SkyPosition + ?Sized>(&self, target: &S) -> Vec<AltAz> {
        self.obstimes
            .iter()
            .map(|epoch| self.transform_at(target, epoch))
            .collect()
    }

    /// Project `target` at a single instant.
    ///
    /// Arguments
    /// ---------
    /// * `target`: the object to look at
    /// * `epoch`: the instant of observation
    ///
    /// Return
    /// ------
    /// * altitude and azimuth of the target seen from the frame's observer
    pub fn transform_at<S: SkyPosition + ?Sized>(&self, target: &S, epoch: &Epoch) -> AltAz {
        let coord = target.sky_coord(epoch);
        let of_date = RefSystem::Equt(RefEpoch::Epoch(epoch.to_mjd_tt_days()));

        let mut position = rotpn(&coord.frame, &of_date) * coord.to_cartesian();
        match coord.distance {
            Some(_) => position -= self.observer.geocentric_position(epoch),
            None => position = correct_aberration(position, -earth_velocity(epoch)),
        }

        let (ra, dec, _) = cartesian_to_radec(position);
        let hour_angle = self.observer.local_sidereal_time(epoch) - ra;

        let (alt, az) = equatorial_to_horizontal(hour_angle, dec, self.observer.latitude_rad());
        AltAz {
            alt: alt / RADEG,
            az: az / RADEG,
        }
    }
}

/// Convert an hour angle and a declination into altitude and azimuth.
///
/// Arguments
/// ---------
/// * `hour_angle`: local hour angle (radians, positive westward)
/// * `dec`: declination of date (radians)
/// * `lat`: geodetic latitude of the observer (radians)
///
/// Return
/// ------
/// * `(alt, az)` in radians, azimuth from North through East within `[0, 2π)`
///
/// ```text
/// sin(alt) = sin φ sin δ + cos φ cos δ cos H
/// tan(az)  = −cos δ sin H / (sin δ cos φ − cos δ cos H sin φ)
/// ```
pub fn equatorial_to_horizontal(hour_angle: Radian, dec: Radian, lat: Radian) -> (Radian, Radian) {
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();
    let (sin_p, cos_p) = lat.sin_cos();

    let sin_alt = (sin_p * sin_d + cos_p * cos_d * cos_h).clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    let az = (-cos_d * sin_h)
        .atan2(sin_d * cos_p - cos_d * cos_h * sin_p)
        .rem_euclid(DPI);

    // rem_euclid may round a tiny negative angle up to 2π
    (alt, if az >= DPI { 0.0 } else { az })
}

#[cfg(test)]
mod coordinates_test {
    use super::*;
    use crate::constants::{HEIGHT, LATITUDE, LONGITUDE};
    use crate::solar_system::Body;
    use approx::assert_abs_diff_eq;
    use hifitime::Unit;

    fn site() -> Observer {
        Observer::new(LONGITUDE, LATITUDE, HEIGHT, None).unwrap()
    }

    // 2020-07-23 00:00 BST
    fn reference_epoch() -> Epoch {
        Epoch::from_gregorian_utc(2020, 7, 22, 23, 0, 0, 0)
    }

    #[test]
    fn test_equatorial_to_horizontal_cardinal_points() {
        let lat = 56.15 * RADEG;

        // on the meridian, south of the zenith
        let (alt, az) = equatorial_to_horizontal(0.0, 0.0, lat);
        assert_abs_diff_eq!(alt / RADEG, 90.0 - 56.15, epsilon = 1e-12);
        assert_abs_diff_eq!(az / RADEG, 180.0, epsilon = 1e-12);

        // rising due east, setting due west
        let (alt, az) = equatorial_to_horizontal(-90.0 * RADEG, 0.0, lat);
        assert_abs_diff_eq!(alt, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(az / RADEG, 90.0, epsilon = 1e-12);

        let (_, az) = equatorial_to_horizontal(90.0 * RADEG, 0.0, lat);
        assert_abs_diff_eq!(az / RADEG, 270.0, epsilon = 1e-12);

        // celestial pole stands at the latitude, due north
        let (alt, az) = equatorial_to_horizontal(1.234, 90.0 * RADEG, lat);
        assert_abs_diff_eq!(alt / RADEG, 56.15, epsilon = 1e-12);
        assert!(az / RADEG < 1e-9 || az / RADEG > 360.0 - 1e-9);
        assert!(az < DPI);
    }

    #[test]
    fn test_transit_altitude() {
        for dec in [-30.0, 0.0, 20.0, 44.0, 70.0] {
            let (alt, _) = equatorial_to_horizontal(0.0, dec * RADEG, LATITUDE * RADEG);
            assert_abs_diff_eq!(alt / RADEG, 90.0 - (LATITUDE - dec).abs(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_transform_is_idempotent() {
        let frame = AltAzFrame::new(site(), vec![reference_epoch()]);
        let comet = SkyCoord::icrs(210.5, 44.0);

        let first = frame.transform(&comet);
        let second = frame.transform(&comet);
        assert_eq!(first, second);

        let moon_first = frame.transform(&Body::Moon);
        let moon_second = frame.transform(&Body::Moon);
        assert_eq!(moon_first, moon_second);
    }

    #[test]
    fn test_reference_projection() {
        let frame = AltAzFrame::new(site(), vec![reference_epoch()]);
        let altaz = frame.transform(&SkyCoord::icrs(210.5, 44.0));

        // rigorous precession, IAU 1980 nutation, annual aberration and Meeus sidereal
        // time (UT1 = UTC)
        assert_eq!(altaz.len(), 1);
        assert_abs_diff_eq!(altaz[0].alt, 44.581873, epsilon = 2e-3);
        assert_abs_diff_eq!(altaz[0].az, 286.179097, epsilon = 2e-3);
    }

    #[test]
    fn test_aberration_of_a_fixed_direction() {
        let epoch = reference_epoch();
        let frame = AltAzFrame::new(site(), vec![epoch]);
        let comet = SkyCoord::icrs(210.5, 44.0);

        let of_date = RefSystem::Equt(RefEpoch::Epoch(epoch.to_mjd_tt_days()));
        let mean = rotpn(&comet.frame, &of_date) * comet.to_cartesian();
        let apparent = correct_aberration(mean, -earth_velocity(&epoch));

        // 16.7" for this direction, never more than 20.5"
        let shift = mean.angle(&apparent) / crate::constants::RADSEC;
        assert_abs_diff_eq!(shift, 16.66, epsilon = 0.1);

        let with = frame.transform_at(&comet, &epoch);
        let (ra, dec, _) = cartesian_to_radec(mean);
        let (alt, az) = equatorial_to_horizontal(
            frame.observer().local_sidereal_time(&epoch) - ra,
            dec,
            LATITUDE * RADEG,
        );
        let moved = ((with.alt - alt / RADEG).powi(2) + (with.az - az / RADEG).powi(2)).sqrt();
        assert!(moved > 3e-3 && moved < 1e-2);
    }

    #[test]
    fn test_transform_matches_hour_angle_formula() {
        let epoch = reference_epoch();
        let observer = site();
        let frame = AltAzFrame::new(observer.clone(), vec![epoch]);
        let comet = SkyCoord::icrs(210.5, 44.0);

        let of_date = RefSystem::Equt(RefEpoch::Epoch(epoch.to_mjd_tt_days()));
        let mean = rotpn(&comet.frame, &of_date) * comet.to_cartesian();
        let (ra, dec, _) = cartesian_to_radec(correct_aberration(mean, -earth_velocity(&epoch)));
        let (alt, az) = equatorial_to_horizontal(
            observer.local_sidereal_time(&epoch) - ra,
            dec,
            LATITUDE * RADEG,
        );

        let altaz = frame.transform_at(&comet, &epoch);
        assert_abs_diff_eq!(altaz.alt, alt / RADEG, epsilon = 1e-9);
        assert_abs_diff_eq!(altaz.az, az / RADEG, epsilon = 1e-9);
    }

    #[test]
    fn test_moon_parallax_lowers_the_moon() {
        let epoch = reference_epoch();
        let frame = AltAzFrame::new(site(), vec![epoch]);

        let moon = Body::Moon.sky_coord(&epoch);
        let geocentric = SkyCoord { distance: None, ..moon };

        let topo = frame.transform_at(&moon, &epoch);
        let geo = frame.transform_at(&geocentric, &epoch);

        // horizontal parallax is close to one degree, scaled by cos(alt)
        let dip = geo.alt - topo.alt;
        assert!(dip > 0.0);
        assert!(dip < 1.05 * geo.alt.to_radians().cos());
        assert!(dip > 0.85 * geo.alt.to_radians().cos());
    }

    #[test]
    fn test_sun_below_horizon_at_local_midnight() {
        let reference = reference_epoch();
        let epochs: Vec<Epoch> = (-6..=6).map(|h| reference + Unit::Hour * h as i64).collect();
        let frame = AltAzFrame::new(site(), epochs);

        let sun = frame.transform(&Body::Sun);
        assert_eq!(sun.len(), 13);

        // about twelve degrees down at 23h UTC, north-west of north, lowest one hour later
        let midnight = sun[6];
        assert!(midnight.alt < -11.0 && midnight.alt > -13.0);
        assert!(midnight.az > 335.0 && midnight.az < 346.0);
        assert!(sun[7].alt < midnight.alt);

        // up in the evening, above the horizon again at 05h UTC
        assert!(sun[0].alt > 20.0);
        assert!(sun[12].alt > 0.0);
        for altaz in &sun {
            assert!((0.0..360.0).contains(&altaz.az));
        }
    }
}

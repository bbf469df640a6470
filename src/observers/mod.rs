//! # Observing site
//!
//! The [`Observer`] describes the fixed ground station the chart is drawn for and
//! provides its orientation with respect to the sky at any instant:
//!
//! * the **geocentric parallax coordinates** `(ρ·cosφ, ρ·sinφ)` derived from the geodetic
//!   latitude and height on the GRS80/WGS84 ellipsoid ([`geodetic_to_parallax`]);
//! * the **Greenwich apparent sidereal time** ([`Observer::gast`]) and the local one
//!   ([`Observer::local_sidereal_time`]);
//! * the **geocentric position** of the site in the true equator and equinox of date
//!   ([`Observer::geocentric_position`]), used to turn geocentric Sun and Moon positions
//!   into topocentric ones.
//!
//! ## Time scales
//!
//! Earth rotation is evaluated with UT1 ≈ UTC (the ~1 s difference is far below the chart
//! resolution); precession and nutation use TT.
//!
//! ## Units
//!
//! * longitude, latitude: degrees (east and north positive)
//! * height: meters above the ellipsoid
//! * body-fixed and geocentric positions: astronomical units
use hifitime::Epoch;
use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::constants::{Degree, Meter, Radian, DPI, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU};
use crate::earth_orientation::equequ;
use crate::neowise_errors::NeowiseError;
use crate::ref_system::{rotmt, Axis};
use crate::time::gmst;

/// Observer geodetic parameters and precomputed body-fixed position.
///
/// * `longitude`, `latitude`: geodetic, degrees; the local horizon is tangent to the
///   ellipsoid at this latitude.
/// * `height`: meters above the ellipsoid.
/// * `rho_cos_phi`, `rho_sin_phi`: distance from the geocenter in equatorial radii, times
///   the cosine and sine of the geocentric latitude.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Observer {
    pub longitude: NotNan<f64>,
    pub latitude: NotNan<f64>,
    pub height: NotNan<f64>,
    pub rho_cos_phi: NotNan<f64>,
    pub rho_sin_phi: NotNan<f64>,
    pub name: Option<String>,
    /// Site position in the Earth-fixed frame, AU
    itrf_position: Vector3<NotNan<f64>>,
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: Geodetic longitude in **degrees** (east positive).
    /// * `latitude`: Geodetic latitude in **degrees**.
    /// * `height`: Height above the reference ellipsoid in **meters**.
    /// * `name`: Optional site name.
    ///
    /// Errors
    /// ----------
    /// * [`NeowiseError::InvalidSite`] if one of the inputs is NaN.
    pub fn new(
        longitude: Degree,
        latitude: Degree,
        height: Meter,
        name: Option<String>,
    ) -> Result<Observer, NeowiseError> {
        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, height);

        let (sin_lon, cos_lon) = longitude.to_radians().sin_cos();
        let equatorial = ERAU * rho_cos_phi;
        let itrf_position = Vector3::new(
            NotNan::new(equatorial * cos_lon)?,
            NotNan::new(equatorial * sin_lon)?,
            NotNan::new(ERAU * rho_sin_phi)?,
        );

        Ok(Observer {
            longitude: NotNan::new(longitude)?,
            latitude: NotNan::new(latitude)?,
            height: NotNan::new(height)?,
            rho_cos_phi: NotNan::new(rho_cos_phi)?,
            rho_sin_phi: NotNan::new(rho_sin_phi)?,
            name,
            itrf_position,
        })
    }

    /// Geodetic latitude in radians.
    pub fn latitude_rad(&self) -> Radian {
        self.latitude.to_radians()
    }

    /// Earth-fixed position of the site in AU, before any rotation of the Earth.
    pub fn body_fixed_coord(&self) -> Vector3<f64> {
        self.itrf_position.map(NotNan::into_inner)
    }

    /// Greenwich apparent sidereal time at `epoch`, in radians within [0, 2π).
    ///
    /// `GAST = GMST(UT1 ≈ UTC) + equation of the equinoxes(TT)`
    pub fn gast(&self, epoch: &Epoch) -> Radian {
        let tut = epoch.to_mjd_utc_days();
        (gmst(tut) + equequ(epoch.to_mjd_tt_days())).rem_euclid(DPI)
    }

    /// Local apparent sidereal time at `epoch`, in radians within [0, 2π).
    pub fn local_sidereal_time(&self, epoch: &Epoch) -> Radian {
        (self.gast(epoch) + self.longitude.to_radians()).rem_euclid(DPI)
    }

    /// Geocentric position of the observer at `epoch`, in AU, expressed in the
    /// true equator and equinox of date.
    ///
    /// The body-fixed vector is rotated by the apparent sidereal time about the polar axis
    /// (polar motion neglected).
    pub fn geocentric_position(&self, epoch: &Epoch) -> Vector3<f64> {
        rotmt(self.gast(epoch), Axis::Z) * self.body_fixed_coord()
    }
}

/// Parallax constants `(ρ·cosφ', ρ·sinφ')` of a site on the GRS80/WGS84 ellipsoid.
///
/// `lat` is the geodetic latitude in radians and `height` the height above the ellipsoid in
/// meters. Both results are in units of the equatorial radius, φ' being the geocentric
/// latitude:
///
/// ```text
/// tan u    = (b/a) tan φ
/// ρ sin φ' = (b/a) sin u + (h/a) sin φ
/// ρ cos φ' =       cos u + (h/a) cos φ
/// ```
pub fn lat_alt_to_parallax(lat: Radian, height: Meter) -> (f64, f64) {
    let b_over_a = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;
    let h_over_a = height / EARTH_MAJOR_AXIS;
    let (sin_lat, cos_lat) = lat.sin_cos();

    // reduced latitude
    let (sin_u, cos_u) = (b_over_a * sin_lat).atan2(cos_lat).sin_cos();

    (
        cos_u + h_over_a * cos_lat,
        b_over_a * sin_u + h_over_a * sin_lat,
    )
}

/// Same as [`lat_alt_to_parallax`] with the latitude given in **degrees**.
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}

#[cfg(test)]
mod observer_test {
    use super::*;
    use crate::constants::{HEIGHT, LATITUDE, LONGITUDE, RADEG};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_observer_constructor() {
        let observer = Observer::new(0.0, 0.0, 0.0, None).unwrap();
        assert_eq!(observer.longitude, 0.0);
        assert_eq!(observer.rho_cos_phi, 1.0);
        assert_eq!(observer.rho_sin_phi, 0.0);

        let observer =
            Observer::new(289.25058, -30.2446, 2647., Some("Rubin Observatory".to_string()))
                .unwrap();

        assert_eq!(observer.longitude, 289.25058);
        assert_eq!(observer.latitude, -30.2446);
        assert_abs_diff_eq!(observer.rho_cos_phi.into_inner(), 0.8649760504617418, epsilon = 1e-15);
        assert_abs_diff_eq!(observer.rho_sin_phi.into_inner(), -0.5009551027512434, epsilon = 1e-15);
    }

    #[test]
    fn test_observer_rejects_nan() {
        let err = Observer::new(LONGITUDE, f64::NAN, HEIGHT, None).unwrap_err();
        assert!(matches!(err, NeowiseError::InvalidSite(_)));
    }

    #[test]
    fn test_parallax_constants() {
        // Pan-STARRS 1 on Haleakala
        let (rho_cos, rho_sin) = geodetic_to_parallax(20.707233557, 3067.694);
        assert_abs_diff_eq!(rho_cos, 0.9362410003211518, epsilon = 1e-15);
        assert_abs_diff_eq!(rho_sin, 0.35154299856304305, epsilon = 1e-15);
    }

    #[test]
    fn test_body_fixed_coord_radius() {
        let site = Observer::new(LONGITUDE, LATITUDE, HEIGHT, None).unwrap();
        let r = site.body_fixed_coord();

        // between the polar and the equatorial radius
        let r_m = r.norm() / ERAU * EARTH_MAJOR_AXIS;
        assert!(r_m > EARTH_MINOR_AXIS && r_m < EARTH_MAJOR_AXIS + HEIGHT);

        // geocentric latitude is a little below the geodetic one
        let phi = (r.z / r.norm()).asin() / RADEG;
        assert!(phi < LATITUDE && phi > LATITUDE - 0.25);

        assert_abs_diff_eq!(r.y.atan2(r.x) / RADEG, LONGITUDE, epsilon = 1e-12);
    }

    #[test]
    fn test_local_sidereal_time() {
        let site = Observer::new(LONGITUDE, LATITUDE, HEIGHT, None).unwrap();
        let epoch = Epoch::from_gregorian_utc(2020, 7, 22, 23, 0, 0, 0);

        let lst = site.local_sidereal_time(&epoch);
        let expected = (site.gast(&epoch) + LONGITUDE * RADEG).rem_euclid(DPI);
        assert_abs_diff_eq!(lst, expected, epsilon = 1e-12);
        assert!((0.0..DPI).contains(&lst));

        // one sidereal day later the sky is back in place
        let sidereal_day = hifitime::Unit::Second * (86400.0 / crate::constants::SIDEREAL_RATE);
        let later = site.local_sidereal_time(&(epoch + sidereal_day));
        let diff = (later - lst + std::f64::consts::PI).rem_euclid(DPI) - std::f64::consts::PI;
        assert_abs_diff_eq!(diff, 0.0, epsilon = 2e-6);
    }

    #[test]
    fn test_geocentric_position_rotates_with_the_earth() {
        let site = Observer::new(LONGITUDE, LATITUDE, HEIGHT, None).unwrap();
        let epoch = Epoch::from_gregorian_utc(2020, 7, 22, 23, 0, 0, 0);

        let pos = site.geocentric_position(&epoch);
        assert_abs_diff_eq!(pos.norm(), site.body_fixed_coord().norm(), epsilon = 1e-15);
        assert_abs_diff_eq!(pos.z, site.body_fixed_coord().z, epsilon = 1e-15);

        // the site meridian points at the local sidereal time
        let ra = pos.y.atan2(pos.x).rem_euclid(DPI);
        assert_abs_diff_eq!(ra, site.local_sidereal_time(&epoch), epsilon = 1e-12);
    }
}

//! Earth orientation: obliquity, nutation, precession and the equation of the equinoxes.
//!
//! All routines take a Modified Julian Date in the TT scale and return angles in radians
//! (nutation angles are returned in arcseconds, as in the IAU tables).
use nalgebra::Matrix3;

use crate::{
    constants::{ArcSec, Radian, RADEG, RADSEC, T2000},
    ref_system::{rotmt, Axis},
};

/// Julian centuries elapsed since J2000 for an MJD (TT).
#[inline]
fn centuries_since_j2000(tjm: f64) -> f64 {
    (tjm - T2000) / 36525.0
}

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// The obliquity is a cubic polynomial in Julian centuries since J2000,
/// evaluated with Horner's scheme:
///
/// ```text
/// ε = ((ob3 * t + ob2) * t + ob1) * t + ob0;
/// ```
pub fn obleq(tjm: f64) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = centuries_since_j2000(tjm);

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// One periodic term of the nutation series.
///
/// Multipliers of (D, M, M', F, Ω) then the longitude and obliquity
/// coefficients in 0.0001" with their secular rates.
struct NutationTerm {
    args: [f64; 5],
    psi: (f64, f64),
    eps: (f64, f64),
}

const fn term(args: [f64; 5], psi: (f64, f64), eps: (f64, f64)) -> NutationTerm {
    NutationTerm { args, psi, eps }
}

/// Terms of the IAU 1980 series above 0.0012", good to a few hundredths of an arcsecond.
const NUTATION_TERMS: [NutationTerm; 32] = [
    term([0., 0., 0., 0., 1.], (-171996.0, -174.2), (92025.0, 8.9)),
    term([-2., 0., 0., 2., 2.], (-13187.0, -1.6), (5736.0, -3.1)),
    term([0., 0., 0., 2., 2.], (-2274.0, -0.2), (977.0, -0.5)),
    term([0., 0., 0., 0., 2.], (2062.0, 0.2), (-895.0, 0.5)),
    term([0., 1., 0., 0., 0.], (1426.0, -3.4), (54.0, -0.1)),
    term([0., 0., 1., 0., 0.], (712.0, 0.1), (-7.0, 0.0)),
    term([-2., 1., 0., 2., 2.], (-517.0, 1.2), (224.0, -0.6)),
    term([0., 0., 0., 2., 1.], (-386.0, -0.4), (200.0, 0.0)),
    term([0., 0., 1., 2., 2.], (-301.0, 0.0), (129.0, -0.1)),
    term([-2., -1., 0., 2., 2.], (217.0, -0.5), (-95.0, 0.3)),
    term([-2., 0., 1., 0., 0.], (-158.0, 0.0), (0.0, 0.0)),
    term([-2., 0., 0., 2., 1.], (129.0, 0.1), (-70.0, 0.0)),
    term([0., 0., -1., 2., 2.], (123.0, 0.0), (-53.0, 0.0)),
    term([0., 0., 1., 0., 1.], (63.0, 0.1), (-33.0, 0.0)),
    term([2., 0., -1., 2., 2.], (-59.0, 0.0), (26.0, 0.0)),
    term([0., 0., -1., 0., 1.], (-58.0, -0.1), (32.0, 0.0)),
    term([0., 0., 1., 2., 1.], (-51.0, 0.0), (27.0, 0.0)),
    term([-2., 0., 2., 0., 0.], (48.0, 0.0), (0.0, 0.0)),
    term([0., 0., -2., 2., 1.], (46.0, 0.0), (-24.0, 0.0)),
    term([2., 0., 0., 2., 2.], (-38.0, 0.0), (16.0, 0.0)),
    term([0., 0., 2., 2., 2.], (-31.0, 0.0), (13.0, 0.0)),
    term([0., 0., 2., 0., 0.], (29.0, 0.0), (0.0, 0.0)),
    term([-2., 0., 1., 2., 2.], (29.0, 0.0), (-12.0, 0.0)),
    term([0., 0., 0., 2., 0.], (26.0, 0.0), (0.0, 0.0)),
    term([-2., 0., 0., 2., 0.], (-22.0, 0.0), (0.0, 0.0)),
    term([0., 0., -1., 2., 1.], (21.0, 0.0), (-10.0, 0.0)),
    term([0., 2., 0., 0., 0.], (17.0, -0.1), (0.0, 0.0)),
    term([2., 0., -1., 0., 1.], (16.0, 0.0), (-8.0, 0.0)),
    term([-2., 2., 0., 2., 2.], (-16.0, 0.1), (7.0, 0.0)),
    term([0., 1., 0., 0., 1.], (-15.0, 0.0), (9.0, 0.0)),
    term([-2., 0., 1., 0., 1.], (-13.0, 0.0), (7.0, 0.0)),
    term([0., -1., 0., 0., 1.], (-12.0, 0.0), (6.0, 0.0)),
];

/// Nutation in longitude and obliquity (Δψ, Δε) in arcseconds.
///
/// Truncated IAU 1980 (Wahr) theory. The fundamental arguments are the mean elongation of
/// the Moon (D), the mean anomalies of the Sun (M) and the Moon (M'), the Moon's argument of
/// latitude (F) and the longitude of its ascending node (Ω).
pub fn nutation(tjm: f64) -> (ArcSec, ArcSec) {
    let t = centuries_since_j2000(tjm);

    let fundamental = [
        (297.85036 + 445267.111480 * t - 0.0019142 * t * t) * RADEG,
        (357.52772 + 35999.050340 * t - 0.0001603 * t * t) * RADEG,
        (134.96298 + 477198.867398 * t + 0.0086972 * t * t) * RADEG,
        (93.27191 + 483202.017538 * t - 0.0036825 * t * t) * RADEG,
        (125.04452 - 1934.136261 * t + 0.0020708 * t * t) * RADEG,
    ];

    let (dpsi, deps) = NUTATION_TERMS
        .iter()
        .fold((0.0, 0.0), |(dpsi, deps), term| {
            let arg: f64 = term
                .args
                .iter()
                .zip(fundamental.iter())
                .map(|(k, a)| k * a)
                .sum();
            (
                dpsi + (term.psi.0 + term.psi.1 * t) * arg.sin(),
                deps + (term.eps.0 + term.eps.1 * t) * arg.cos(),
            )
        });

    // 0.0001" -> "
    (dpsi * 1e-4, deps * 1e-4)
}

/// Nutation matrix: mean equator and equinox of date → true equator and equinox of date.
///
/// `x_true = N · x_mean`: rotate onto the mean ecliptic, advance the longitude by Δψ, then
/// come back onto the true equator (obliquity ε + Δε).
pub fn rnut(tjm: f64) -> Matrix3<f64> {
    let epsm = obleq(tjm);
    let (dpsi, deps) = nutation(tjm);

    let epst = epsm + deps * RADSEC;

    rotmt(epst, Axis::X) * rotmt(dpsi * RADSEC, Axis::Z) * rotmt(-epsm, Axis::X)
}

/// Equation of the equinoxes in radians: `Δψ · cos ε`.
///
/// Difference between apparent and mean sidereal time.
pub fn equequ(tjm: f64) -> Radian {
    let oblm = obleq(tjm);
    let (dpsi, _deps) = nutation(tjm);

    RADSEC * dpsi * oblm.cos()
}

/// Compute the precession matrix from J2000 to the mean equator and equinox of a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date in TT scale (epoch of transformation).
///
/// Returns
/// --------
/// * `x_mean(tjm) = prec(tjm) · x_J2000`
///
/// The angles are polynomials in Julian centuries `T`:
///
/// ```text
/// ζ(T)     = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// θ(T)     = (0.5567530 - 0.0001185·T - 0.0000116·T²) · T  [deg]
/// z(T)     = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// ```
pub fn prec(tjm: f64) -> Matrix3<f64> {
    let t = centuries_since_j2000(tjm);

    let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
    let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
    let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

    rotmt(z, Axis::Z) * rotmt(-theta, Axis::Y) * rotmt(zeta, Axis::Z)
}

//! # Celestial reference systems
//!
//! Positions handled by the crate live in one of three reference systems, each tied to an
//! epoch:
//!
//! * `Equm`: mean equator and mean equinox (precession only). ICRS is taken as `Equm(J2000)`.
//! * `Equt`: true equator and true equinox (precession and nutation). Hour angles are
//!   measured in `Equt` of date.
//! * `Eclm`: mean ecliptic and mean equinox. The Sun and Moon series are given in
//!   `Eclm` of date.
//!
//! [`rotpn`] builds the rotation between any two of them by passing through the canonical
//! `Equm(J2000)` frame:
//!
//! ```text
//!  Eclm(t₁) ──X(ε)──► Equm(t₁) ──Pᵀ(t₁)──► Equm(J2000) ──P(t₂)──► Equm(t₂) ──N(t₂)──► Equt(t₂)
//!  Equt(t₁) ──Nᵀ(t₁)─┘
//! ```
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{Radian, DPI, EPS, T2000, VLIGHT_AU},
    earth_orientation::{obleq, prec, rnut},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefEpoch {
    J2000,
    /// Modified Julian Date, TT scale
    Epoch(f64),
}

impl RefEpoch {
    pub fn date(&self) -> f64 {
        match *self {
            RefEpoch::J2000 => T2000,
            RefEpoch::Epoch(d) => d,
        }
    }

    /// True when the epoch is J2000 up to [`EPS`].
    fn is_j2000(&self) -> bool {
        (self.date() - T2000).abs() <= EPS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefSystem {
    // Equatorial Mean, equatorial coordinates based on equator and mean equinox
    // at a given epoch (J2000 for instance)
    // (corrected for precession but not for nutation)
    Equm(RefEpoch),
    // Equatorial True (same as Equm but corrected for precession and nutation)
    Equt(RefEpoch),
    // Ecliptic mean, ecliptic coordinates based on ecliptic and mean equinox
    // at a given epoch (J2000 for instance)
    Eclm(RefEpoch),
}

impl RefSystem {
    pub fn epoch(&self) -> RefEpoch {
        match *self {
            RefSystem::Equm(e) => e,
            RefSystem::Equt(e) => e,
            RefSystem::Eclm(e) => e,
        }
    }

    /// Rotation taking a vector expressed in `self` to the mean equator and equinox of J2000.
    fn to_equm_j2000(self) -> Matrix3<f64> {
        let epoch = self.epoch();
        let date = epoch.date();

        let to_equm = match self {
            RefSystem::Equm(_) => Matrix3::identity(),
            RefSystem::Equt(_) => rnut(date).transpose(),
            RefSystem::Eclm(_) => rotmt(obleq(date), Axis::X),
        };

        if epoch.is_j2000() {
            to_equm
        } else {
            prec(date).transpose() * to_equm
        }
    }
}

/// Principal axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Compute the rotation matrix between two celestial reference systems and epochs.
///
/// Arguments
/// ---------
/// * `ref_sys1`: source reference system and epoch.
/// * `ref_sys2`: target reference system and epoch.
///
/// Output
/// -------
/// * the rotation matrix such that `x₂ = rot · x₁`, where `x₁` is a vector
///   in the source system and `x₂` the same vector expressed in the target system.
///
/// Remarks
/// -------
/// * Precession uses the IAU 1976 model ([`prec`]), nutation the truncated IAU 1980
///   series ([`rnut`]) and the obliquity [`obleq`].
/// * Identical systems give the identity without evaluating any model.
pub fn rotpn(ref_sys1: &RefSystem, ref_sys2: &RefSystem) -> Matrix3<f64> {
    if ref_sys1 == ref_sys2 {
        return Matrix3::identity();
    }
    ref_sys2.to_equm_j2000().transpose() * ref_sys1.to_equm_j2000()
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The matrix is an **active rotation** of a vector by `alpha` (counter-clockwise when the
/// axis points toward the viewer): `x' = R · x`. The rotation of the *frame* by `alpha` is
/// therefore `rotmt(-alpha, axis)`.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `axis` - Axis of rotation.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Convert a 3D Cartesian position vector to right ascension and declination.
///
/// Returns
/// --------
/// * Tuple `(α, δ, ρ)`:
///     - `α`: right ascension (or longitude) in radians, in the range [0, 2π).
///     - `δ`: declination (or latitude) in radians, in the range [−π/2, +π/2].
///     - `ρ`: Euclidean norm of the vector (distance to the origin).
///
/// If the input vector has zero norm, the result is `(0.0, 0.0, 0.0)`.
pub fn cartesian_to_radec(cartesian_position: Vector3<f64>) -> (Radian, Radian, f64) {
    let pos_norm = cartesian_position.norm();
    if pos_norm == 0. {
        return (0.0, 0.0, pos_norm);
    }

    let delta = (cartesian_position.z / pos_norm).clamp(-1.0, 1.0).asin();

    let cos_delta = delta.cos();
    if cos_delta == 0.0 {
        return (0.0, delta, pos_norm);
    }

    let alpha = cartesian_position
        .y
        .atan2(cartesian_position.x)
        .rem_euclid(DPI);
    (alpha, delta, pos_norm)
}

/// Inverse of [`cartesian_to_radec`]: the vector of length `rho` pointing at `(alpha, delta)`.
pub fn radec_to_cartesian(alpha: Radian, delta: Radian, rho: f64) -> Vector3<f64> {
    let (sin_d, cos_d) = delta.sin_cos();
    let (sin_a, cos_a) = alpha.sin_cos();
    Vector3::new(rho * cos_d * cos_a, rho * cos_d * sin_a, rho * sin_d)
}

/// Apparent position of a target moving at `vrel` with respect to the observer.
///
/// First order in `v/c`: the target is seen where it was one light time `‖xrel‖ / c` ago.
/// For a direction at infinity, pass a unit vector and minus the observer velocity: the
/// result is the annual aberration of that direction.
///
/// Arguments
/// ---------
/// * `xrel`: position of the target relative to the observer (AU)
/// * `vrel`: velocity of the target relative to the observer (AU/day)
///
/// Return
/// ------
/// * `xrel − (‖xrel‖ / c) · vrel`, not normalized
pub fn correct_aberration(xrel: Vector3<f64>, vrel: Vector3<f64>) -> Vector3<f64> {
    let light_time = xrel.norm() / VLIGHT_AU;
    xrel - light_time * vrel
}

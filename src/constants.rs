//! # Constants and type definitions for neowise
//!
//! This module centralizes the **physical constants**, **conversion factors**, the
//! **observing defaults** and the **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians, AU ↔ km)
//! - Observing-site and object defaults (the values the chart is drawn for)
//! - Twilight thresholds
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Ratio of the sidereal to the solar rotation rate of the Earth
pub const SIDEREAL_RATE: f64 = 1.00273790934;

// -------------------------------------------------------------------------------------------------
// Observing defaults
// -------------------------------------------------------------------------------------------------

/// Geodetic latitude of the observing site, degrees north
pub const LATITUDE: Degree = 56.15;

/// Geodetic longitude of the observing site, degrees east
pub const LONGITUDE: Degree = -3.74;

/// Height of the observing site above the ellipsoid, meters
pub const HEIGHT: Meter = 50.0;

/// Offset of the local civil time from UTC, hours (BST)
pub const UTC_OFFSET: f64 = 1.0;

/// MPC designation of comet NEOWISE
pub const NEOWISE_DESIGNATION: &str = "C/2020 F3";

/// Number of samples in the night time grid
pub const GRID_SAMPLES: usize = 1000;

/// Half width of the night window around midnight, hours
pub const HALF_NIGHT_HOURS: f64 = 6.0;

// -------------------------------------------------------------------------------------------------
// Twilight
// -------------------------------------------------------------------------------------------------

/// Solar altitude thresholds of the shaded bands, from daylight to astronomical night.
///
/// The order matters: each band is drawn over the previous one.
pub const TWILIGHT_THRESHOLDS: [Degree; 4] = [0.0, -6.0, -12.0, -18.0];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;

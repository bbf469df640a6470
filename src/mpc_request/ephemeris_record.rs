//! Parsing of the ephemeris table returned by the Minor Planet Ephemeris Service.
//!
//! The service answers with an HTML page whose `<pre>` block holds a fixed-width table:
//!
//! ```text
//! Date       UT      R.A. (J2000) Decl.  Delta     r     El.    Ph.   m1     Sky Motion
//!             h m s                                                            "/min    P.A.
//! 2020 07 23 000000 13 51 39.8 +45 26 45   0.778   0.582  65.6  87.1   4.8    5.89    017.3
//! ```
//!
//! Only the date, right ascension and declination are required; the distances, elongation,
//! phase angle and magnitude that follow are kept when they can be read.
use chrono::{Datelike, NaiveDateTime, Timelike};
use hifitime::Epoch;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants::{AstronomicalUnit, Degree},
    conversion::{parse_dec_to_deg, parse_ra_to_deg},
    coordinates::SkyCoord,
    neowise_errors::NeowiseError,
};

static ROW_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<date>\d{4} \d{2} \d{2} \d{6})\s+(?P<ra>\d{2} \d{2} \d{2}(?:\.\d+)?)\s+(?P<dec>[+-]\d{2} \d{2} \d{2}(?:\.\d+)?)(?P<rest>.*)$",
    )
    .expect("ephemeris row regex must compile")
});

static ROW_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4} \d{2} \d{2} ").expect("ephemeris row start regex must compile")
});

/// One row of the ephemeris.
///
/// * `date`: UTC instant of the row
/// * `ra`, `dec`: astrometric J2000 position, degrees
/// * `delta`, `r`: geocentric and heliocentric distances, AU
/// * `elongation`, `phase`: degrees
/// * `magnitude`: total magnitude for comets, V for asteroids
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    pub date: NaiveDateTime,
    pub ra: Degree,
    pub dec: Degree,
    pub delta: Option<AstronomicalUnit>,
    pub r: Option<AstronomicalUnit>,
    pub elongation: Option<Degree>,
    pub phase: Option<Degree>,
    pub magnitude: Option<f64>,
}

impl EphemerisRecord {
    /// Parse one line of the table.
    ///
    /// Errors
    /// ------
    /// * [`NeowiseError::InvalidEphemerisRow`] when the date, right ascension or declination
    ///   cannot be read.
    pub fn from_row(line: &str) -> Result<Self, NeowiseError> {
        let invalid = || NeowiseError::InvalidEphemerisRow(line.trim_end().to_string());

        let caps = ROW_REGEX.captures(line.trim_end()).ok_or_else(invalid)?;

        let date = NaiveDateTime::parse_from_str(&caps["date"], "%Y %m %d %H%M%S")
            .map_err(|_| invalid())?;
        let ra = parse_ra_to_deg(&caps["ra"]).ok_or_else(invalid)?;
        let dec = parse_dec_to_deg(&caps["dec"]).ok_or_else(invalid)?;

        let mut extra = caps["rest"]
            .split_whitespace()
            .map(|field| field.parse::<f64>().ok());
        let mut next = || extra.next().flatten();

        Ok(EphemerisRecord {
            date,
            ra,
            dec,
            delta: next(),
            r: next(),
            elongation: next(),
            phase: next(),
            magnitude: next(),
        })
    }

    /// The instant of the row on the UTC scale.
    pub fn epoch(&self) -> Epoch {
        Epoch::from_gregorian_utc(
            self.date.year(),
            self.date.month() as u8,
            self.date.day() as u8,
            self.date.hour() as u8,
            self.date.minute() as u8,
            self.date.second() as u8,
            self.date.nanosecond(),
        )
    }

    /// The position as a fixed ICRS direction.
    pub fn sky_coord(&self) -> SkyCoord {
        SkyCoord::icrs(self.ra, self.dec)
    }
}

/// Extract the ephemeris rows from an MPES answer.
///
/// Arguments
/// ---------
/// * `body`: the HTML answer of the service
/// * `designation`: the requested object, used in error messages
///
/// Return
/// ------
/// * The rows in table order. Lines that look like rows but cannot be read are logged and
///   skipped.
///
/// Errors
/// ------
/// * [`NeowiseError::MpcServiceError`] when the answer holds no `<pre>` table (unknown
///   object, service message, ...).
/// * [`NeowiseError::EmptyEphemeris`] when the table holds no readable row.
pub fn parse_mpes_response(
    body: &str,
    designation: &str,
) -> Result<Vec<EphemerisRecord>, NeowiseError> {
    let table = body
        .split_once("<pre>")
        .and_then(|(_, rest)| rest.split_once("</pre>"))
        .map(|(table, _)| table)
        .ok_or_else(|| {
            NeowiseError::MpcServiceError(format!("no ephemeris table returned for {designation}"))
        })?;

    let records: Vec<EphemerisRecord> = table
        .lines()
        .filter(|line| ROW_START_REGEX.is_match(line))
        .filter_map(|line| match EphemerisRecord::from_row(line) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("{designation}: dropping ephemeris row: {err}");
                None
            }
        })
        .collect();

    if records.is_empty() {
        return Err(NeowiseError::EmptyEphemeris(designation.to_string()));
    }
    Ok(records)
}

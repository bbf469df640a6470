//! # Night time anchor and sampling grid
//!
//! The chart covers the twelve hours around "midnight tonight". This module derives that
//! instant from the local wall clock and samples the night into an evenly spaced grid.
//!
//! ```text
//! now (local) ──► date + 1 day at 00:00:00.000000 ──► − UTC offset ──► reference (UTC)
//!                                                                      │
//!                                     reference + linspace(−6 h, +6 h, 1000) ◄┘
//! ```
//!
//! Sidereal time ([`gmst`]) lives here as well since it only depends on the instant.
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use hifitime::{Duration, Epoch, Unit};

use crate::constants::{DPI, SIDEREAL_RATE, T2000};
use crate::neowise_errors::NeowiseError;

/// The instant the chart is centered on.
///
/// * `date`: calendar date of "tomorrow", used in the output file name
/// * `midnight`: 00:00:00 of `date`, read as a UTC instant
/// * `reference`: `midnight` minus the UTC offset, i.e. local midnight expressed in UTC
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightAnchor {
    pub date: NaiveDate,
    pub midnight: Epoch,
    pub reference: Epoch,
}

impl NightAnchor {
    /// Derive the anchor from the local wall-clock time.
    ///
    /// Arguments
    /// ---------
    /// * `now`: current local date and time
    /// * `utc_offset_hours`: fixed offset of the local clock from UTC (no DST handling)
    ///
    /// Return
    /// ------
    /// * The anchor of the following midnight, or an error at the end of the calendar range
    pub fn from_local(now: NaiveDateTime, utc_offset_hours: f64) -> Result<Self, NeowiseError> {
        let date = now.date().succ_opt().ok_or_else(|| {
            NeowiseError::InvalidTimeGrid(format!("no calendar day after {}", now.date()))
        })?;

        let midnight =
            Epoch::from_gregorian_utc_at_midnight(date.year(), date.month() as u8, date.day() as u8);
        let reference = midnight - Unit::Hour * utc_offset_hours;

        Ok(NightAnchor {
            date,
            midnight,
            reference,
        })
    }

    /// The anchor as a naive date time: always 00:00:00.000000 of `date`.
    pub fn naive_midnight(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }
}

/// Evenly spaced instants around a reference epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    offsets: Vec<Duration>,
    epochs: Vec<Epoch>,
}

impl TimeGrid {
    /// Sample `[reference - half_width, reference + half_width]` with `samples` points,
    /// both bounds included.
    ///
    /// Errors
    /// ------
    /// * [`NeowiseError::InvalidTimeGrid`] if fewer than two samples are requested or the
    ///   half width is not strictly positive.
    pub fn around(
        reference: Epoch,
        half_width: Duration,
        samples: usize,
    ) -> Result<Self, NeowiseError> {
        if samples < 2 {
            return Err(NeowiseError::InvalidTimeGrid(format!(
                "at least two samples are needed, got {samples}"
            )));
        }
        let half_hours = half_width.to_unit(Unit::Hour);
        if half_hours <= 0.0 {
            return Err(NeowiseError::InvalidTimeGrid(format!(
                "half width must be positive, got {half_width}"
            )));
        }

        let last = (samples - 1) as f64;
        let offsets: Vec<Duration> = (0..samples)
            .map(|i| Unit::Hour * (-half_hours + 2.0 * half_hours * i as f64 / last))
            .collect();
        let epochs = offsets.iter().map(|dt| reference + *dt).collect();

        Ok(TimeGrid { offsets, epochs })
    }

    pub fn offsets(&self) -> &[Duration] {
        &self.offsets
    }

    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Offsets expressed in hours, the x axis of the chart.
    pub fn offset_hours(&self) -> Vec<f64> {
        self.offsets.iter().map(|dt| dt.to_unit(Unit::Hour)).collect()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// IAU 1982 polynomial for the mean sidereal time at 0h UT1, plus the
/// fractional-day correction due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: f64) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;

    // fraction of the day, scaled to sidereal rotation
    let h = tjm.fract() * DPI;
    (gmst0 + h * SIDEREAL_RATE).rem_euclid(DPI)
}

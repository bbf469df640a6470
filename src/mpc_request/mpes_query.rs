//! Form parameters of a Minor Planet Ephemeris Service request.
use std::fmt;

use chrono::NaiveDateTime;

/// Geocentric location code of the MPC
pub const GEOCENTER: &str = "500";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl StepUnit {
    fn code(&self) -> &'static str {
        match self {
            StepUnit::Days => "d",
            StepUnit::Hours => "h",
            StepUnit::Minutes => "m",
            StepUnit::Seconds => "s",
        }
    }
}

/// Interval between two rows of the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub value: u32,
    pub unit: StepUnit,
}

impl Step {
    pub fn new(value: u32, unit: StepUnit) -> Self {
        Step { value, unit }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::new(1, StepUnit::Days)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.code())
    }
}

/// One ephemeris request: an object, a start instant (UTC) and a number of rows.
///
/// Positions are asked geocentric, with sexagesimal right ascension and declination and the
/// date given in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpesQuery {
    pub designation: String,
    pub start: NaiveDateTime,
    pub number: usize,
    pub step: Step,
    pub location: String,
}

impl MpesQuery {
    pub fn new(designation: &str, start: NaiveDateTime, number: usize) -> Self {
        MpesQuery {
            designation: designation.to_string(),
            start,
            number,
            step: Step::default(),
            location: GEOCENTER.to_string(),
        }
    }

    /// Start instant in the `YYYY MM DD hhmmss` form the service expects.
    pub fn start_field(&self) -> String {
        self.start.format("%Y %m %d %H%M%S").to_string()
    }

    /// The url-encoded form body, field by field.
    pub fn form_params(&self) -> [(&'static str, String); 28] {
        [
            ("ty", "e".into()),
            ("TextArea", self.designation.clone()),
            ("d", self.start_field()),
            ("l", self.number.to_string()),
            ("i", self.step.value.to_string()),
            ("u", self.step.unit.code().into()),
            ("uto", "0".into()),
            ("c", self.location.clone()),
            ("long", "".into()),
            ("lat", "".into()),
            ("alt", "".into()),
            ("raty", "a".into()),
            ("s", "t".into()),
            ("m", "m".into()),
            ("adir", "S".into()),
            ("oed", "".into()),
            ("e", "-2".into()),
            ("resoc", "".into()),
            ("tit", "".into()),
            ("bu", "".into()),
            ("ch", "c".into()),
            ("ce", "f".into()),
            ("js", "f".into()),
            ("igd", "n".into()),
            ("ibh", "n".into()),
            ("fp", "n".into()),
            ("ph", "".into()),
            ("ed", "".into()),
        ]
    }
}

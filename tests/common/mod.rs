#![allow(dead_code)]

use std::cell::RefCell;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{NaiveDate, NaiveDateTime};
use neowise::{
    mpc_request::{EphemerisProvider, EphemerisRecord},
    neowise_errors::NeowiseError,
    plot::{FigureWriter, VisibilityFigure},
};

/// Comet position used by the offline pipeline, 2020-07-23 00:00 UTC.
pub fn neowise_record(start: NaiveDateTime) -> EphemerisRecord {
    EphemerisRecord {
        date: start,
        ra: 210.5,
        dec: 44.0,
        delta: Some(0.694),
        r: Some(0.626),
        elongation: Some(65.0),
        phase: Some(86.6),
        magnitude: Some(3.0),
    }
}

/// Local wall-clock time of the run: 2020-07-22 21:37 BST.
pub fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 7, 22)
        .unwrap()
        .and_hms_opt(21, 37, 0)
        .unwrap()
}

/// Answers every request with a fixed position and remembers the requests.
#[derive(Debug, Default)]
pub struct FixedEphemeris {
    pub requests: RefCell<Vec<(String, NaiveDateTime, usize)>>,
}

impl EphemerisProvider for FixedEphemeris {
    fn ephemeris(
        &self,
        designation: &str,
        start: NaiveDateTime,
        number: usize,
    ) -> Result<Vec<EphemerisRecord>, NeowiseError> {
        self.requests
            .borrow_mut()
            .push((designation.to_string(), start, number));
        Ok(vec![neowise_record(start)])
    }
}

/// A service that knows nothing.
#[derive(Debug, Default)]
pub struct EmptyEphemeris;

impl EphemerisProvider for EmptyEphemeris {
    fn ephemeris(
        &self,
        _designation: &str,
        _start: NaiveDateTime,
        _number: usize,
    ) -> Result<Vec<EphemerisRecord>, NeowiseError> {
        Ok(vec![])
    }
}

/// Keeps the figures in memory and leaves an empty marker file at each path.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub figures: RefCell<Vec<(Utf8PathBuf, VisibilityFigure)>>,
}

impl FigureWriter for RecordingWriter {
    fn write(&self, figure: &VisibilityFigure, path: &Utf8Path) -> Result<(), NeowiseError> {
        std::fs::write(path, b"")?;
        self.figures
            .borrow_mut()
            .push((path.to_path_buf(), figure.clone()));
        Ok(())
    }
}

/// A fresh, empty directory under the system temporary directory.
pub fn scratch_dir(name: &str) -> Utf8PathBuf {
    let dir = std::env::temp_dir().join(format!("neowise-{name}-{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    Utf8PathBuf::from_path_buf(dir).unwrap()
}

/// Names of the files in `dir`.
pub fn file_names(dir: &Utf8Path) -> Vec<String> {
    let mut names: Vec<String> = dir
        .read_dir_utf8()
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string())
        .collect();
    names.sort();
    names
}

//! # Minor Planet Center ephemerides
//!
//! The comet position comes from the Minor Planet Ephemeris Service (MPES) of the
//! Minor Planet Center. The exchange is a single form POST:
//!
//! ```text
//! MpesQuery ──form_params──► POST mpeph2.cgi ──HTML──► parse_mpes_response ──► Vec<EphemerisRecord>
//! ```
//!
//! The pipeline only depends on the [`EphemerisProvider`] trait, so any other source of
//! rows (a file, a fixed table in tests) can stand in for the service.
//!
//! ## Errors
//!
//! There is no retry and no fallback: transport failures, HTTP error statuses, answers
//! without table and empty tables all surface as a [`NeowiseError`].
pub mod ephemeris_record;
pub mod mpes_query;

use chrono::NaiveDateTime;
use log::debug;

use crate::{env_state::NeowiseEnv, neowise_errors::NeowiseError};

pub use ephemeris_record::{parse_mpes_response, EphemerisRecord};
pub use mpes_query::MpesQuery;

/// Endpoint of the Minor Planet Ephemeris Service
pub const MPES_URL: &str = "https://cgi.minorplanetcenter.net/cgi-bin/mpeph2.cgi";

/// A source of ephemeris rows.
pub trait EphemerisProvider {
    /// Ephemeris of `designation`, `number` rows starting at `start` (UTC).
    fn ephemeris(
        &self,
        designation: &str,
        start: NaiveDateTime,
        number: usize,
    ) -> Result<Vec<EphemerisRecord>, NeowiseError>;
}

/// The Minor Planet Ephemeris Service, reached through the shared HTTP agent.
#[derive(Debug, Clone)]
pub struct MpcEphemerisService {
    env: NeowiseEnv,
    url: String,
}

impl MpcEphemerisService {
    pub fn new(env: NeowiseEnv) -> Self {
        MpcEphemerisService {
            env,
            url: MPES_URL.to_string(),
        }
    }

    /// Same service behind another endpoint (mirror, proxy).
    pub fn with_url(env: NeowiseEnv, url: &str) -> Self {
        MpcEphemerisService {
            env,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a prepared query and parse the answer.
    pub fn query(&self, query: &MpesQuery) -> Result<Vec<EphemerisRecord>, NeowiseError> {
        debug!(
            "MPES request for {} at {} ({} row(s), step {})",
            query.designation,
            query.start_field(),
            query.number,
            query.step
        );

        let body = self.env.post_form(&self.url, query.form_params())?;
        parse_mpes_response(&body, &query.designation)
    }
}

impl Default for MpcEphemerisService {
    fn default() -> Self {
        MpcEphemerisService::new(NeowiseEnv::default())
    }
}

impl EphemerisProvider for MpcEphemerisService {
    fn ephemeris(
        &self,
        designation: &str,
        start: NaiveDateTime,
        number: usize,
    ) -> Result<Vec<EphemerisRecord>, NeowiseError> {
        self.query(&MpesQuery::new(designation, start, number))
    }
}

#[cfg(test)]
mod mpc_request_test {
    use super::*;

    #[test]
    fn test_service_endpoint() {
        let service = MpcEphemerisService::default();
        assert_eq!(service.url(), MPES_URL);

        let mirror = MpcEphemerisService::with_url(NeowiseEnv::default(), "http://localhost:1/");
        assert_eq!(mirror.url(), "http://localhost:1/");
    }

    #[test]
    fn test_unreachable_service_is_an_http_error() {
        // nothing listens on the discard port of the loopback
        let service = MpcEphemerisService::with_url(
            NeowiseEnv::new(std::time::Duration::from_secs(2)),
            "http://127.0.0.1:9/cgi-bin/mpeph2.cgi",
        );
        let start = chrono::NaiveDate::from_ymd_opt(2020, 7, 23)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let err = service.ephemeris("C/2020 F3", start, 1).unwrap_err();
        assert!(matches!(err, NeowiseError::UreqHttpError(_)));
    }

    #[test]
    #[cfg(feature = "mpc-online")]
    fn test_neowise_from_mpes() {
        use approx::assert_abs_diff_eq;

        let start = chrono::NaiveDate::from_ymd_opt(2020, 7, 23)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let records = MpcEphemerisService::default()
            .ephemeris("C/2020 F3", start, 1)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, start);
        // the comet was in Ursa Major that night
        assert_abs_diff_eq!(records[0].ra, 210.0, epsilon = 5.0);
        assert_abs_diff_eq!(records[0].dec, 44.0, epsilon = 5.0);
    }
}

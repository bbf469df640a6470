//! # neowise environment state
//!
//! This module defines [`crate::env_state::NeowiseEnv`], the **shared environment object**
//! that owns the persistent HTTP client used to reach the Minor Planet Center.
//!
//! ## Structure
//!
//! ```text
//! NeowiseEnv
//! └── http_client  (ureq::Agent, global timeout)
//! ```
//!
//! ## Notes
//!
//! - HTTP 4xx/5xx answers are turned into [`ureq::Error::StatusCode`] by the agent, so every
//!   service failure surfaces as a [`NeowiseError`](crate::neowise_errors::NeowiseError).
//! - There is no retry: a failed request aborts the run.
use std::{fmt::Debug, time::Duration};
use ureq::Agent;

use crate::neowise_errors::NeowiseError;

/// Default global timeout of an HTTP exchange
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// This object is passed to the request helpers to provide access to the HTTP client
///
/// # Fields
///
/// * `http_client` - A ureq agent used to make HTTP requests
#[derive(Debug, Clone)]
pub struct NeowiseEnv {
    pub http_client: Agent,
}

impl Default for NeowiseEnv {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_TIMEOUT)
    }
}

impl NeowiseEnv {
    /// Create a new environment whose HTTP agent gives up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();

        NeowiseEnv { http_client: agent }
    }

    /// POST an url-encoded form and return the response body as text.
    ///
    /// Arguments
    /// ---------
    /// * `url`: the endpoint
    /// * `form`: the `(name, value)` pairs of the form
    ///
    /// Return
    /// ------
    /// * The response body, or the transport/status error reported by ureq
    pub(crate) fn post_form<I, K, V>(&self, url: &str, form: I) -> Result<String, NeowiseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = self
            .http_client
            .post(url)
            .send_form(form)?
            .body_mut()
            .read_to_string()?;
        Ok(body)
    }
}

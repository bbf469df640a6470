//! # neowise
//!
//! Altitude of comet C/2020 F3 (NEOWISE), the Sun and the Moon over one night, seen from a
//! fixed site, drawn as a PNG chart with the twilight phases shaded.
//!
//! ```rust, no_run
//! use neowise::{config::NeowiseConfig, neowise::Neowise};
//!
//! let now = chrono::Local::now().naive_local();
//! let path = Neowise::new(NeowiseConfig::default())
//!     .and_then(|neowise| neowise.run(now))
//!     .unwrap();
//! println!("chart written to {path}");
//! ```
pub mod config;
pub mod constants;
mod conversion;
pub mod coordinates;
pub mod earth_orientation;
pub mod env_state;
pub mod mpc_request;
pub mod neowise;
pub mod neowise_errors;
pub mod observers;
pub mod plot;
pub mod ref_system;
pub mod solar_system;
pub mod time;

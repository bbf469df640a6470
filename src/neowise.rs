//! # Neowise: the one-night pipeline
//!
//! [`Neowise`] wires the stages of a run together:
//!
//! ```text
//! local clock ──► NightAnchor ──► EphemerisProvider (1 row at midnight)
//!                     │                    │
//!                     ▼                    ▼
//!                 TimeGrid ──► AltAzFrame ──► Sun / Moon / comet AltAz
//!                                                   │
//!                                                   ▼
//!                       VisibilityFigure ──► FigureWriter ──► {prefix}-YYYY-MM-DD.png
//! ```
//!
//! The ephemeris source and the figure writer are type parameters, so the whole pipeline
//! runs offline with a fixed ephemeris table and an in-memory writer.
//!
//! Every stage fails fast: the first error aborts the run and no file is written.
use camino::Utf8PathBuf;
use chrono::{NaiveDate, NaiveDateTime};
use hifitime::Unit;
use log::{debug, info};

use crate::{
    config::NeowiseConfig,
    coordinates::AltAzFrame,
    env_state::NeowiseEnv,
    mpc_request::{EphemerisProvider, EphemerisRecord, MpcEphemerisService},
    neowise_errors::NeowiseError,
    observers::Observer,
    plot::{FigureWriter, NightVisibility, PngWriter, VisibilityFigure},
    solar_system::Body,
    time::{NightAnchor, TimeGrid},
};

/// File name of the chart drawn for the night ending on `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use neowise::neowise::output_filename;
///
/// let date = NaiveDate::from_ymd_opt(2020, 7, 23).unwrap();
/// assert_eq!(output_filename("neowise", date), "neowise-2020-07-23.png");
/// ```
pub fn output_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.png", date.format("%Y-%m-%d"))
}

#[derive(Debug)]
pub struct Neowise<P = MpcEphemerisService, W = PngWriter> {
    config: NeowiseConfig,
    observer: Observer,
    provider: P,
    writer: W,
}

impl Neowise {
    /// Pipeline backed by the Minor Planet Ephemeris Service and the PNG writer.
    ///
    /// Errors
    /// ------
    /// * [`NeowiseError::InvalidSite`] if a site coordinate is NaN.
    pub fn new(config: NeowiseConfig) -> Result<Self, NeowiseError> {
        let provider = MpcEphemerisService::new(NeowiseEnv::new(config.http_timeout));
        Neowise::with_provider(config, provider, PngWriter)
    }
}

impl<P: EphemerisProvider, W: FigureWriter> Neowise<P, W> {
    /// Pipeline with a custom ephemeris source and figure writer.
    pub fn with_provider(
        config: NeowiseConfig,
        provider: P,
        writer: W,
    ) -> Result<Self, NeowiseError> {
        let observer = Observer::new(
            config.site.longitude,
            config.site.latitude,
            config.site.height,
            None,
        )?;

        Ok(Neowise {
            config,
            observer,
            provider,
            writer,
        })
    }

    pub fn config(&self) -> &NeowiseConfig {
        &self.config
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Position of the comet at the anchor midnight, read as UTC by the service.
    pub fn fetch_position(&self, anchor: &NightAnchor) -> Result<EphemerisRecord, NeowiseError> {
        let designation = &self.config.designation;
        let records = self
            .provider
            .ephemeris(designation, anchor.naive_midnight(), 1)?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| NeowiseError::EmptyEphemeris(designation.clone()))
            .inspect(|record| {
                info!(
                    "{designation} at {}: RA {:.4}°, Dec {:.4}°",
                    record.date, record.ra, record.dec
                )
            })
    }

    /// Sample the night around the anchor and project the three objects on the local sky.
    ///
    /// The comet keeps the position of `record` over the whole night; the Sun and the Moon
    /// are recomputed at every sample.
    pub fn night_visibility(
        &self,
        anchor: &NightAnchor,
        record: &EphemerisRecord,
    ) -> Result<NightVisibility, NeowiseError> {
        let plot = &self.config.plot;
        let grid = TimeGrid::around(
            anchor.reference,
            Unit::Hour * plot.half_width_hours,
            plot.samples,
        )?;
        debug!(
            "time grid of {} samples from {} to {}",
            grid.len(),
            grid.epochs()[0],
            grid.epochs()[grid.len() - 1]
        );

        let frame = AltAzFrame::new(self.observer.clone(), grid.epochs().to_vec());

        Ok(NightVisibility {
            object_label: self.config.object_label.clone(),
            timezone_label: self.config.site.timezone_label.clone(),
            offset_hours: grid.offset_hours(),
            sun: frame.transform(&Body::Sun),
            moon: frame.transform(&Body::Moon),
            comet: frame.transform(&record.sky_coord()),
        })
    }

    /// Local midnight following `now`, on the configured UTC offset.
    pub fn anchor(&self, now: NaiveDateTime) -> Result<NightAnchor, NeowiseError> {
        let anchor = NightAnchor::from_local(now, self.config.site.utc_offset_hours)?;
        info!(
            "night of {}: local midnight at {} UTC",
            anchor.date, anchor.reference
        );
        Ok(anchor)
    }

    /// Draw the chart of the night of `anchor` with the comet at the position of `record`.
    ///
    /// Return
    /// ------
    /// * The path of the written chart
    pub fn draw(
        &self,
        anchor: &NightAnchor,
        record: &EphemerisRecord,
    ) -> Result<Utf8PathBuf, NeowiseError> {
        let night = self.night_visibility(anchor, record)?;
        let figure = VisibilityFigure::build(&night, &self.config.plot);

        let path = self
            .config
            .output_dir
            .join(output_filename(&self.config.output_prefix, anchor.date));
        self.writer.write(&figure, &path)?;

        if let Some((hour, top)) = night.comet_max_altitude() {
            info!(
                "comet highest at {:+.2} h: altitude {:.1}°, azimuth {:.1}°",
                hour, top.alt, top.az
            );
        }
        info!(
            "{} of {} samples in astronomical night, chart written to {path}",
            night.dark_samples(),
            night.offset_hours.len()
        );

        Ok(path)
    }

    /// Draw the chart of the coming night.
    ///
    /// Arguments
    /// ---------
    /// * `now`: the local wall-clock time; the chart is centered on the next local midnight
    ///
    /// Return
    /// ------
    /// * The path of the written chart
    pub fn run(&self, now: NaiveDateTime) -> Result<Utf8PathBuf, NeowiseError> {
        let anchor = self.anchor(now)?;
        let record = self.fetch_position(&anchor)?;
        self.draw(&anchor, &record)
    }
}

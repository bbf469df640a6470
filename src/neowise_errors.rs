use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeowiseError {
    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("Minor Planet Ephemeris Service error: {0}")]
    MpcServiceError(String),

    #[error("No ephemeris row returned for {0}")]
    EmptyEphemeris(String),

    #[error("Invalid ephemeris row: {0}")]
    InvalidEphemerisRow(String),

    #[error("Invalid observing site: {0}")]
    InvalidSite(#[from] ordered_float::FloatIsNan),

    #[error("Invalid time grid: {0}")]
    InvalidTimeGrid(String),

    #[error("Unable to render the visibility chart: {0}")]
    RenderError(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for NeowiseError {
    fn eq(&self, other: &Self) -> bool {
        use NeowiseError::*;
        match (self, other) {
            (MpcServiceError(a), MpcServiceError(b)) => a == b,
            (EmptyEphemeris(a), EmptyEphemeris(b)) => a == b,
            (InvalidEphemerisRow(a), InvalidEphemerisRow(b)) => a == b,
            (InvalidTimeGrid(a), InvalidTimeGrid(b)) => a == b,
            (RenderError(a), RenderError(b)) => a == b,

            // not comparable: same variant is enough
            (UreqHttpError(_), UreqHttpError(_)) => true,
            (InvalidSite(_), InvalidSite(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Identifies one of the five radial distributions of a blade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    Chord,
    Twist,
    Thickness,
    Sweep,
    VerticalOffset,
}

impl std::fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DistributionKind::Chord => "chord",
            DistributionKind::Twist => "twist",
            DistributionKind::Thickness => "thickness",
            DistributionKind::Sweep => "sweep",
            DistributionKind::VerticalOffset => "vertical offset",
        };
        write!(f, "{}", name)
    }
}

pub type ParametrizeResult<T> = Result<T, ParametrizeError>;

/// Errors raised while normalizing or resampling blade distributions. Any of these aborts the
/// whole parametrization, there are no partial results.
#[derive(Debug, Error)]
pub enum ParametrizeError {
    #[error("station input must hold 1 shared array or 5 per-distribution arrays, found {found}")]
    InvalidInputShape { found: usize },

    #[error("{kind} distribution needs at least 2 stations, found {found}")]
    InsufficientStations { kind: DistributionKind, found: usize },

    #[error("chord stations and values are required to build the common grid")]
    MissingReferenceDistribution,

    #[error("{0} distribution is required")]
    MissingDistribution(DistributionKind),

    #[error("{0} distribution has values but no stations")]
    MissingStations(DistributionKind),

    #[error("{kind} distribution has {stations} stations but {values} values")]
    LengthMismatch {
        kind: DistributionKind,
        stations: usize,
        values: usize,
    },

    #[error("{kind} stations must be strictly increasing (index {index})")]
    NonMonotonicStations { kind: DistributionKind, index: usize },

    #[error("requested station count must be positive")]
    InvalidStationCount,

    #[error("diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),

    #[error("edge factor must lie in [0, 1], got {0}")]
    InvalidEdgeFactor(f64),

    #[error("chord tip station must be positive to normalize the grid, got {0}")]
    InvalidReferenceLength(f64),
}

/// Errors from the external solver boundary. A failed run is reported as-is and never retried.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to launch solver: {0}")]
    Launch(#[source] io::Error),

    #[error("solver exited with {status}: {stderr}")]
    ExternalProcess { status: ExitStatus, stderr: String },

    #[error("solver io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no catalog entry for part '{0}'")]
    UnknownPart(String),

    #[error(transparent)]
    Parametrize(#[from] ParametrizeError),
}

/// Raised when the sample points cannot support a piecewise cubic interpolant.
#[derive(Debug, Error, PartialEq)]
pub enum InterpolationError {
    #[error("at least 2 samples are required, found {0}")]
    TooFewPoints(usize),

    #[error("{x} abscissas but {y} ordinates")]
    LengthMismatch { x: usize, y: usize },

    #[error("abscissas must be strictly increasing (index {0})")]
    NotIncreasing(usize),
}

impl ParametrizeError {
    /// Attaches the distribution being resampled to an interpolation failure.
    pub fn from_interpolation(kind: DistributionKind, err: InterpolationError) -> Self {
        match err {
            InterpolationError::TooFewPoints(found) => {
                ParametrizeError::InsufficientStations { kind, found }
            }
            InterpolationError::LengthMismatch { x, y } => ParametrizeError::LengthMismatch {
                kind,
                stations: x,
                values: y,
            },
            InterpolationError::NotIncreasing(index) => {
                ParametrizeError::NonMonotonicStations { kind, index }
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read job file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed job file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("the solver needs a prop file path")]
    MissingPropFile,
}

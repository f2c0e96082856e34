//! Raw blade input and its normalization into five explicit (station, value) pairs.

use crate::errors::{DistributionKind, ParametrizeError, ParametrizeResult};
use serde::{Deserialize, Serialize};

/// The radial positions at which the input distributions are sampled. The shape of the input is
/// decided once, here, and is never re-inferred downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationInput {
    /// A single station array which is reused verbatim by every distribution
    Shared(Vec<f64>),

    /// An independent station array for each distribution. Distributions that were not supplied
    /// may leave their stations unset.
    PerDistribution {
        chord: Option<Vec<f64>>,
        twist: Option<Vec<f64>>,
        thickness: Option<Vec<f64>>,
        sweep: Option<Vec<f64>>,
        vertical_offset: Option<Vec<f64>>,
    },
}

impl StationInput {
    /// Builds the station input from a positional collection of arrays. Five arrays are unpacked
    /// in the fixed order chord, twist, thickness, sweep, vertical offset. A single array is
    /// shared by all distributions. Any other count is rejected.
    pub fn from_arrays(mut arrays: Vec<Vec<f64>>) -> ParametrizeResult<Self> {
        match arrays.len() {
            1 => Ok(StationInput::Shared(arrays.remove(0))),
            5 => {
                let mut it = arrays.into_iter().map(Some);
                Ok(StationInput::PerDistribution {
                    chord: it.next().flatten(),
                    twist: it.next().flatten(),
                    thickness: it.next().flatten(),
                    sweep: it.next().flatten(),
                    vertical_offset: it.next().flatten(),
                })
            }
            found => Err(ParametrizeError::InvalidInputShape { found }),
        }
    }

    fn for_kind(&self, kind: DistributionKind) -> Option<&Vec<f64>> {
        match self {
            StationInput::Shared(s) => Some(s),
            StationInput::PerDistribution {
                chord,
                twist,
                thickness,
                sweep,
                vertical_offset,
            } => match kind {
                DistributionKind::Chord => chord.as_ref(),
                DistributionKind::Twist => twist.as_ref(),
                DistributionKind::Thickness => thickness.as_ref(),
                DistributionKind::Sweep => sweep.as_ref(),
                DistributionKind::VerticalOffset => vertical_offset.as_ref(),
            },
        }
    }
}

/// User supplied blade geometry. Value arrays left as `None` mean the distribution was not
/// supplied at all, which is a different state from an empty array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeGeometryInput {
    pub diameter: f64,
    pub stations: StationInput,

    #[serde(default)]
    pub chord: Option<Vec<f64>>,

    #[serde(default)]
    pub twist: Option<Vec<f64>>,

    #[serde(default)]
    pub thickness: Option<Vec<f64>>,

    #[serde(default)]
    pub sweep: Option<Vec<f64>>,

    #[serde(default)]
    pub vertical_offset: Option<Vec<f64>>,

    pub requested_station_count: usize,
}

impl BladeGeometryInput {
    /// Creates an input with only the mandatory chord and twist distributions. Optional
    /// distributions can be attached with the `with_*` methods.
    pub fn new(
        diameter: f64,
        stations: StationInput,
        chord: Vec<f64>,
        twist: Vec<f64>,
        requested_station_count: usize,
    ) -> Self {
        BladeGeometryInput {
            diameter,
            stations,
            chord: Some(chord),
            twist: Some(twist),
            thickness: None,
            sweep: None,
            vertical_offset: None,
            requested_station_count,
        }
    }

    pub fn with_thickness(mut self, values: Vec<f64>) -> Self {
        self.thickness = Some(values);
        self
    }

    pub fn with_sweep(mut self, values: Vec<f64>) -> Self {
        self.sweep = Some(values);
        self
    }

    pub fn with_vertical_offset(mut self, values: Vec<f64>) -> Self {
        self.vertical_offset = Some(values);
        self
    }

    fn values(&self, kind: DistributionKind) -> Option<&Vec<f64>> {
        match kind {
            DistributionKind::Chord => self.chord.as_ref(),
            DistributionKind::Twist => self.twist.as_ref(),
            DistributionKind::Thickness => self.thickness.as_ref(),
            DistributionKind::Sweep => self.sweep.as_ref(),
            DistributionKind::VerticalOffset => self.vertical_offset.as_ref(),
        }
    }
}

/// A single distribution ready for resampling. Both members are `None` when the distribution
/// was never supplied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadialPair {
    pub station: Option<Vec<f64>>,
    pub value: Option<Vec<f64>>,
}

impl RadialPair {
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }
}

/// The five normalized distributions of a blade. No interpolation or validation of the station
/// ordering happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialProfile {
    pub chord: RadialPair,
    pub twist: RadialPair,
    pub thickness: RadialPair,
    pub sweep: RadialPair,
    pub vertical_offset: RadialPair,
}

impl RadialProfile {
    pub fn new(input: &BladeGeometryInput) -> ParametrizeResult<Self> {
        let pair = |kind: DistributionKind| match input.values(kind) {
            None => RadialPair::default(),
            Some(values) => RadialPair {
                station: input.stations.for_kind(kind).cloned(),
                value: Some(values.clone()),
            },
        };

        let profile = RadialProfile {
            chord: pair(DistributionKind::Chord),
            twist: pair(DistributionKind::Twist),
            thickness: pair(DistributionKind::Thickness),
            sweep: pair(DistributionKind::Sweep),
            vertical_offset: pair(DistributionKind::VerticalOffset),
        };

        if profile.chord.station.is_none() || profile.chord.value.is_none() {
            return Err(ParametrizeError::MissingReferenceDistribution);
        }

        Ok(profile)
    }

    pub fn get(&self, kind: DistributionKind) -> &RadialPair {
        match kind {
            DistributionKind::Chord => &self.chord,
            DistributionKind::Twist => &self.twist,
            DistributionKind::Thickness => &self.thickness,
            DistributionKind::Sweep => &self.sweep,
            DistributionKind::VerticalOffset => &self.vertical_offset,
        }
    }

    /// The smallest and largest chord stations, which bound the common grid
    pub fn reference_range(&self) -> ParametrizeResult<(f64, f64)> {
        let stations = self
            .chord
            .station
            .as_ref()
            .ok_or(ParametrizeError::MissingReferenceDistribution)?;

        if stations.len() < 2 {
            return Err(ParametrizeError::InsufficientStations {
                kind: DistributionKind::Chord,
                found: stations.len(),
            });
        }

        let min = stations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = stations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok((min, max))
    }
}

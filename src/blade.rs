use crate::errors::ParametrizeResult;
use crate::profile::BladeGeometryInput;
use crate::unifier::{StationUnifier, UnifierParams};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A single resampled station, borrowed from the columns of a `ResampledBladeGeometry`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeStation {
    pub radius: f64,
    pub normalized: f64,
    pub chord: f64,
    pub twist: f64,
}

/// The blade distributions resampled onto one common radial grid. Every present distribution
/// has the same length as `common_station` and its entries correspond index for index with it.
/// This is computed once and never updated; a geometry change requires a new input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledBladeGeometry {
    pub diameter: f64,
    pub common_station: Vec<f64>,
    pub normalized_station: Vec<f64>,
    pub chord: Vec<f64>,
    pub twist: Vec<f64>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thickness: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sweep: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vertical_offset: Option<Vec<f64>>,
}

impl ResampledBladeGeometry {
    /// Parametrizes the input with linear spacing and linear extrapolation
    pub fn new(input: &BladeGeometryInput) -> ParametrizeResult<Self> {
        StationUnifier::default().unify(input)
    }

    pub fn with_params(input: &BladeGeometryInput, params: UnifierParams) -> ParametrizeResult<Self> {
        StationUnifier::new(params).unify(input)
    }

    pub fn radius(&self) -> f64 {
        self.diameter * 0.5
    }

    pub fn len(&self) -> usize {
        self.common_station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.common_station.is_empty()
    }

    pub fn stations(&self) -> impl Iterator<Item = BladeStation> + '_ {
        self.common_station
            .iter()
            .zip(self.normalized_station.iter())
            .zip(self.chord.iter().zip(self.twist.iter()))
            .map(|((r, n), (c, t))| BladeStation {
                radius: *r,
                normalized: *n,
                chord: *c,
                twist: *t,
            })
    }

    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}

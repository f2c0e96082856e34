//! Job files describing a complete parametrization run.

use crate::catalog::Catalog;
use crate::errors::ConfigError;
use crate::profile::BladeGeometryInput;
use crate::propfile::AeroCoefficients;
use crate::solver::OperatingPoint;
use crate::unifier::UnifierParams;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

fn default_blades() -> u32 {
    2
}

/// Where the raw blade geometry comes from: given inline, or looked up by part code in a
/// catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeometrySource {
    Catalog {
        catalog: PathBuf,
        code: String,
        requested_station_count: usize,
    },
    Inline(BladeGeometryInput),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub qprop: PathBuf,
    pub motor_file: PathBuf,
    pub point: OperatingPoint,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,

    /// Blade count, replaced by the catalog's value when the geometry comes from a catalog
    #[serde(default = "default_blades")]
    pub blades: u32,

    pub geometry: GeometrySource,

    #[serde(default)]
    pub params: UnifierParams,

    #[serde(default)]
    pub aero: AeroCoefficients,

    #[serde(default)]
    pub prop_file: Option<PathBuf>,

    #[serde(default)]
    pub solver: Option<SolverConfig>,
}

impl JobConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Produces the geometry input and the blade count to use for it
    pub fn resolve_geometry(&self) -> Result<(BladeGeometryInput, u32), ConfigError> {
        match &self.geometry {
            GeometrySource::Inline(input) => Ok((input.clone(), self.blades)),
            GeometrySource::Catalog {
                catalog,
                code,
                requested_station_count,
            } => {
                let catalog = Catalog::load(catalog)?;
                let entry = catalog.get(code)?;
                log::debug!("using catalog entry '{}' with {} rows", code, entry.radial.len());
                Ok((entry.to_input(*requested_station_count), entry.blades))
            }
        }
    }
}

//! Lookup of vendor propeller geometry tables stored as JSON.

use crate::blade::ResampledBladeGeometry;
use crate::errors::CatalogError;
use crate::profile::{BladeGeometryInput, StationInput};
use crate::unifier::UnifierParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One row of a vendor radial table. Sweep and vertical offset are often missing from vendor
/// data, in which case the whole column is treated as not supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialRow {
    pub station: f64,
    pub chord: f64,
    pub twist: f64,

    #[serde(default)]
    pub sweep: Option<f64>,

    #[serde(default)]
    pub zhigh: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub blades: u32,
    pub radius: f64,
    pub radial: Vec<RadialRow>,
}

fn column<F: Fn(&RadialRow) -> Option<f64>>(rows: &[RadialRow], f: F) -> Option<Vec<f64>> {
    rows.iter().map(f).collect()
}

impl CatalogEntry {
    /// Builds a parametrization input from the table, sharing the station column between all of
    /// the distributions.
    pub fn to_input(&self, requested_station_count: usize) -> BladeGeometryInput {
        let rows = &self.radial;
        let mut input = BladeGeometryInput::new(
            2.0 * self.radius,
            StationInput::Shared(rows.iter().map(|r| r.station).collect()),
            rows.iter().map(|r| r.chord).collect(),
            rows.iter().map(|r| r.twist).collect(),
            requested_station_count,
        );
        input.sweep = column(rows, |r| r.sweep);
        input.vertical_offset = column(rows, |r| r.zhigh);
        input
    }

    pub fn parametrize(
        &self,
        requested_station_count: usize,
        params: UnifierParams,
    ) -> Result<ResampledBladeGeometry, CatalogError> {
        let input = self.to_input(requested_station_count);
        Ok(ResampledBladeGeometry::with_params(&input, params)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn get(&self, code: &str) -> Result<&CatalogEntry, CatalogError> {
        self.entries
            .get(code)
            .ok_or_else(|| CatalogError::UnknownPart(code.to_string()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParametrizeError;

    const SAMPLE: &str = r#"{
        "20x10E": {
            "blades": 2,
            "radius": 10.0,
            "radial": [
                {"station": 1.5, "chord": 1.2, "twist": 35.0, "sweep": 0.1, "zhigh": 0.0},
                {"station": 4.0, "chord": 1.8, "twist": 28.0, "sweep": 0.2, "zhigh": 0.05},
                {"station": 7.0, "chord": 1.6, "twist": 18.0, "sweep": 0.4, "zhigh": 0.1},
                {"station": 10.0, "chord": 0.6, "twist": 12.0, "sweep": 0.7, "zhigh": 0.2}
            ]
        },
        "9x6": {
            "blades": 2,
            "radius": 4.5,
            "radial": [
                {"station": 0.5, "chord": 0.6, "twist": 30.0, "sweep": 0.0},
                {"station": 2.5, "chord": 0.9, "twist": 20.0},
                {"station": 4.5, "chord": 0.4, "twist": 12.0}
            ]
        }
    }"#;

    #[test]
    fn test_lookup() {
        let catalog = Catalog::from_reader(SAMPLE.as_bytes()).unwrap();
        let entry = catalog.get("20x10E").unwrap();

        assert_eq!(2, entry.blades);
        assert_eq!(4, entry.radial.len());
        assert_eq!(vec!["20x10E", "9x6"], catalog.codes().collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_part() {
        let catalog = Catalog::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(matches!(catalog.get("11x7"), Err(CatalogError::UnknownPart(_))));
    }

    #[test]
    fn test_to_input_full_columns() {
        let catalog = Catalog::from_reader(SAMPLE.as_bytes()).unwrap();
        let input = catalog.get("20x10E").unwrap().to_input(40);

        assert_eq!(20.0, input.diameter);
        assert_eq!(Some(vec![0.1, 0.2, 0.4, 0.7]), input.sweep);
        assert!(input.vertical_offset.is_some());

        let blade = ResampledBladeGeometry::new(&input).unwrap();
        assert_eq!(40, blade.len());
        assert_eq!(1.5, blade.common_station[0]);
    }

    #[test]
    fn test_partial_column_is_absent() {
        let catalog = Catalog::from_reader(SAMPLE.as_bytes()).unwrap();
        let input = catalog.get("9x6").unwrap().to_input(10);

        assert!(input.sweep.is_none());
        assert!(input.vertical_offset.is_none());
    }

    #[test]
    fn test_parametrize_error_is_wrapped() {
        let entry = CatalogEntry {
            blades: 2,
            radius: 1.0,
            radial: vec![RadialRow {
                station: 0.5,
                chord: 0.1,
                twist: 20.0,
                sweep: None,
                zhigh: None,
            }],
        };
        let result = entry.parametrize(10, UnifierParams::default());
        assert!(matches!(
            result,
            Err(CatalogError::Parametrize(
                ParametrizeError::InsufficientStations { .. }
            ))
        ));
    }

    #[test]
    fn test_malformed() {
        let result = Catalog::from_reader("{\"a\": 3}".as_bytes());
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }
}

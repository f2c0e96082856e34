//! Reconciles independently sampled radial distributions onto one common station grid.
//!
//! The grid is always built from the chord distribution's native range, even when another
//! distribution covers a different part of the blade. Distributions with partial coverage are
//! extrapolated onto the full span.

use crate::algorithms::linspace;
use crate::blade::ResampledBladeGeometry;
use crate::errors::{DistributionKind, ParametrizeError, ParametrizeResult};
use crate::interpolate::{Extrapolate, Pchip};
use crate::profile::{BladeGeometryInput, RadialPair, RadialProfile};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The distribution of output stations between the hub and the tip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// Evenly spaced stations
    #[default]
    Linear,

    /// Blends even spacing with cosine spacing, clustering stations at the hub and the tip. An
    /// edge factor of 0.0 is identical to linear spacing and 1.0 is full cosine spacing.
    Cosine { edge_factor: f64 },
}

impl Spacing {
    fn fraction(&self, u: f64) -> f64 {
        match self {
            Spacing::Linear => u,
            Spacing::Cosine { edge_factor } => {
                (1.0 - edge_factor) * u + edge_factor * 0.5 * (1.0 - (PI * u).cos())
            }
        }
    }

    fn validate(&self) -> ParametrizeResult<()> {
        match self {
            Spacing::Cosine { edge_factor } if !(0.0..=1.0).contains(edge_factor) => {
                Err(ParametrizeError::InvalidEdgeFactor(*edge_factor))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnifierParams {
    #[serde(default)]
    pub spacing: Spacing,

    #[serde(default)]
    pub extrapolate: Extrapolate,
}

impl UnifierParams {
    pub fn new(spacing: Spacing, extrapolate: Extrapolate) -> Self {
        UnifierParams {
            spacing,
            extrapolate,
        }
    }

    pub fn cosine(edge_factor: f64) -> Self {
        Self::new(Spacing::Cosine { edge_factor }, Extrapolate::default())
    }
}

/// Builds `count` stations spanning the half-open interval `[native_min, native_max)`. The grid is
/// generated with `count + 1` points over the closed interval and the last point is discarded,
/// so that blade segments can later be joined without duplicating the tip station.
pub fn build_common_grid(
    native_min: f64,
    native_max: f64,
    count: usize,
    spacing: Spacing,
) -> ParametrizeResult<Vec<f64>> {
    if count == 0 {
        return Err(ParametrizeError::InvalidStationCount);
    }
    spacing.validate()?;

    let mut grid = match spacing {
        Spacing::Linear => linspace(native_min, native_max, count + 1),
        _ => linspace(0.0, 1.0, count + 1)
            .into_iter()
            .map(|u| native_min + (native_max - native_min) * spacing.fraction(u))
            .collect(),
    };
    grid.pop();

    log::debug!(
        "common grid of {} stations over [{}, {}) with {:?} spacing",
        grid.len(),
        native_min,
        native_max,
        spacing
    );
    Ok(grid)
}

/// Resamples one distribution onto the common grid with a shape preserving cubic. Grid points
/// outside of the distribution's own stations are extrapolated rather than rejected. An absent
/// distribution produces an absent result.
pub fn resample(
    kind: DistributionKind,
    pair: &RadialPair,
    grid: &[f64],
    extrapolate: Extrapolate,
) -> ParametrizeResult<Option<Vec<f64>>> {
    let values = match &pair.value {
        None => return Ok(None),
        Some(v) => v,
    };
    let stations = pair
        .station
        .as_ref()
        .ok_or(ParametrizeError::MissingStations(kind))?;

    let interp = Pchip::new(stations, values, extrapolate)
        .map_err(|e| ParametrizeError::from_interpolation(kind, e))?;

    let mut outside = 0;
    for r in grid.iter().filter(|r| !interp.contains(**r)) {
        log::trace!("{} extrapolated at r = {}", kind, r);
        outside += 1;
    }
    if outside > 0 {
        let (lo, hi) = interp.domain();
        log::warn!(
            "{} is defined on [{}, {}], extrapolating {} of {} stations",
            kind,
            lo,
            hi,
            outside,
            grid.len()
        );
    }

    log::debug!("resampled {} from {} native stations", kind, stations.len());
    Ok(Some(interp.evaluate_many(grid)))
}

/// Runs the full parametrization in a single pass.
pub struct StationUnifier {
    params: UnifierParams,
}

impl Default for StationUnifier {
    fn default() -> Self {
        StationUnifier::new(UnifierParams::default())
    }
}

impl StationUnifier {
    pub fn new(params: UnifierParams) -> Self {
        StationUnifier { params }
    }

    pub fn params(&self) -> &UnifierParams {
        &self.params
    }

    pub fn unify(&self, input: &BladeGeometryInput) -> ParametrizeResult<ResampledBladeGeometry> {
        if !(input.diameter.is_finite() && input.diameter > 0.0) {
            return Err(ParametrizeError::InvalidDiameter(input.diameter));
        }

        let profile = RadialProfile::new(input)?;
        if profile.twist.is_absent() {
            return Err(ParametrizeError::MissingDistribution(DistributionKind::Twist));
        }

        let (native_min, native_max) = profile.reference_range()?;
        if !(native_max.is_finite() && native_max > 0.0) {
            return Err(ParametrizeError::InvalidReferenceLength(native_max));
        }
        let common_station = build_common_grid(
            native_min,
            native_max,
            input.requested_station_count,
            self.params.spacing,
        )?;
        let normalized_station = common_station.iter().map(|r| r / native_max).collect();

        let run = |kind: DistributionKind| {
            resample(kind, profile.get(kind), &common_station, self.params.extrapolate)
        };

        // Chord and twist were checked above, so these always hold a value
        let chord = run(DistributionKind::Chord)?.unwrap_or_default();
        let twist = run(DistributionKind::Twist)?.unwrap_or_default();
        let thickness = run(DistributionKind::Thickness)?;
        let sweep = run(DistributionKind::Sweep)?;
        let vertical_offset = run(DistributionKind::VerticalOffset)?;

        Ok(ResampledBladeGeometry {
            diameter: input.diameter,
            common_station,
            normalized_station,
            chord,
            twist,
            thickness,
            sweep,
            vertical_offset,
        })
    }
}

//! Radial parametrization of propeller blades.
//!
//! Sparse, irregularly spaced chord, twist, thickness, sweep, and vertical offset distributions
//! are resampled onto one common radial grid with a shape preserving cubic interpolant, ready to
//! be written out for the QPROP solver.

pub mod algorithms;
pub mod blade;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod interpolate;
pub mod profile;
pub mod propfile;
pub mod solver;
pub mod unifier;

pub use blade::{BladeStation, ResampledBladeGeometry};
pub use errors::{DistributionKind, ParametrizeError, ParametrizeResult};
pub use interpolate::{Extrapolate, Pchip};
pub use profile::{BladeGeometryInput, RadialPair, RadialProfile, StationInput};
pub use unifier::{build_common_grid, resample, Spacing, StationUnifier, UnifierParams};

//! Shape preserving piecewise cubic Hermite interpolation (PCHIP) of one dimensional data.
//!
//! Slopes at the interior samples are the weighted harmonic mean of the neighboring secants
//! (Fritsch and Carlson), set to zero at local extrema so that the interpolant never overshoots
//! the samples that bound each interval. End slopes use the three-point one-sided formula with
//! the same shape constraints.

use crate::algorithms::segment_index;
use crate::errors::InterpolationError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// How the interpolant is evaluated outside of the range of its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Extends the boundary segment as a straight line using the slope at the end sample.
    #[default]
    Linear,

    /// Keeps evaluating the cubic of the boundary segment beyond its end sample.
    Polynomial,
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn edge_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
    extrapolate: Extrapolate,
}

impl Pchip {
    /// Builds the interpolant through the samples `(x[i], y[i])`. The abscissas must be strictly
    /// increasing and there must be at least two samples.
    pub fn new(x: &[f64], y: &[f64], extrapolate: Extrapolate) -> Result<Self, InterpolationError> {
        if x.len() != y.len() {
            return Err(InterpolationError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        if x.len() < 2 {
            return Err(InterpolationError::TooFewPoints(x.len()));
        }

        // The negated comparison also rejects NaN stations
        if let Some(i) = x.iter().tuple_windows().position(|(a, b)| !(b > a)) {
            return Err(InterpolationError::NotIncreasing(i + 1));
        }

        let h: Vec<f64> = x.iter().tuple_windows().map(|(a, b)| b - a).collect();
        let m: Vec<f64> = y
            .iter()
            .tuple_windows()
            .zip(h.iter())
            .map(|((a, b), hk)| (b - a) / hk)
            .collect();

        let slopes = if x.len() == 2 {
            vec![m[0], m[0]]
        } else {
            let n = x.len();
            let mut d = vec![0.0; n];
            for k in 1..n - 1 {
                let (m0, m1) = (m[k - 1], m[k]);
                if sign(m0) != sign(m1) || m0 == 0.0 || m1 == 0.0 {
                    continue;
                }
                let w1 = 2.0 * h[k] + h[k - 1];
                let w2 = h[k] + 2.0 * h[k - 1];
                d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
            }
            d[0] = edge_slope(h[0], h[1], m[0], m[1]);
            d[n - 1] = edge_slope(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
            d
        };

        Ok(Pchip {
            x: x.to_vec(),
            y: y.to_vec(),
            slopes,
            extrapolate,
        })
    }

    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// The closed interval covered by the samples
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = self.domain();
        v >= lo && v <= hi
    }

    fn hermite(&self, i: usize, v: f64) -> f64 {
        let h = self.x[i + 1] - self.x[i];
        let t = (v - self.x[i]) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * self.y[i] + h10 * h * self.slopes[i] + h01 * self.y[i + 1] + h11 * h * self.slopes[i + 1]
    }

    /// Evaluates the interpolant at a single position, extrapolating according to the policy the
    /// interpolant was built with when the position lies outside of the samples.
    pub fn evaluate(&self, v: f64) -> f64 {
        let last = self.x.len() - 1;
        match self.extrapolate {
            Extrapolate::Linear if v < self.x[0] => self.y[0] + self.slopes[0] * (v - self.x[0]),
            Extrapolate::Linear if v > self.x[last] => {
                self.y[last] + self.slopes[last] * (v - self.x[last])
            }
            _ => self.hermite(segment_index(&self.x, v), v),
        }
    }

    pub fn evaluate_many(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| self.evaluate(*v)).collect()
    }
}

//! Normal-curve overlay and standard-deviation markers.

use super::frame::{Frame, Point};
use super::summary::DistributionSummary;
use std::f64::consts::PI;

pub const CURVE_SAMPLES: usize = 101;

/// Parameters of the expected-outcome overlay: mean E, standard deviation
/// S and the largest plausible outcome M.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub std_dev: f64,
    pub max: f64,
}

impl Spread {
    pub fn new(mean: f64, std_dev: f64, max: f64) -> Self {
        Self { mean, std_dev, max }
    }

    /// M is the highest non-negligible outcome of the distribution.
    pub fn from_summary(summary: &DistributionSummary) -> Self {
        Self {
            mean: summary.mean,
            std_dev: summary.std_dev,
            max: summary.absolute_max as f64,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.mean.is_finite()
            && self.std_dev.is_finite()
            && self.max.is_finite()
            && self.std_dev > 0.0
            && self.max > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Outcome value in [0, M].
    pub value: f64,
    /// Density relative to the peak, in [0, 1].
    pub density: f64,
    pub point: Point,
}

pub fn normal_density(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

/// Samples the normal density at [`CURVE_SAMPLES`] evenly spaced values
/// across [0, M], scaled so the peak reaches the top of the plot area.
///
/// A zero or non-finite S or M yields a flat curve on the baseline.
pub fn gaussian_curve(spread: &Spread, frame: &Frame) -> Vec<CurveSample> {
    let degenerate = spread.is_degenerate();
    let last = (CURVE_SAMPLES - 1) as f64;

    (0..CURVE_SAMPLES)
        .map(|i| {
            let fraction = i as f64 / last;
            let value = if spread.max.is_finite() && spread.max > 0.0 {
                fraction * spread.max
            } else {
                0.0
            };
            let density = if degenerate {
                0.0
            } else {
                // f(x) / f(E), with the normalising constants cancelled.
                let z = (value - spread.mean) / spread.std_dev;
                (-0.5 * z * z).exp()
            };
            CurveSample {
                value,
                density,
                point: Point {
                    x: frame.x_at_fraction(fraction),
                    y: frame.baseline() - density * frame.usable_height(),
                },
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviationMarker {
    /// Multiple of S away from the mean.
    pub sigma: i32,
    pub value: f64,
    pub label: String,
    /// `value / M`, in [0, 1].
    pub position: f64,
}

/// How many sigma steps to mark on each side, from the spread relative to
/// the plotted range.
pub fn marker_reach(ratio: f64) -> i32 {
    if ratio <= 0.05 {
        0
    } else if ratio <= 0.15 {
        1
    } else if ratio <= 0.25 {
        2
    } else {
        3
    }
}

/// Markers at E + k·S for the symmetric k range chosen by S/M, keeping
/// only those that land inside [0, M].
pub fn deviation_markers(spread: &Spread) -> Vec<DeviationMarker> {
    let Spread { mean, max, .. } = *spread;
    if !mean.is_finite() || !max.is_finite() || max <= 0.0 {
        return Vec::new();
    }
    let std_dev = if spread.std_dev.is_finite() {
        spread.std_dev.max(0.0)
    } else {
        0.0
    };

    let reach = marker_reach(std_dev / max);
    (-reach..=reach)
        .filter_map(|k| {
            let value = mean + f64::from(k) * std_dev;
            if !(0.0..=max).contains(&value) {
                return None;
            }
            let label = if k == 0 {
                "Avg".to_string()
            } else {
                format!("{:+}σ", k)
            };
            Some(DeviationMarker {
                sigma: k,
                value,
                label,
                position: value / max,
            })
        })
        .collect()
}

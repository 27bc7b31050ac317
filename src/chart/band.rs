//! Scaling series → confidence-band chart geometry.

use super::frame::{Frame, Point};
use crate::protocol::{SaveNode, ToughnessNode};

pub const GRIDLINE_COUNT: usize = 5;
/// Ceiling used when there is nothing to scale against.
pub const DEFAULT_CEILING: f64 = 10.0;

/// One x position of a scaling series.
#[derive(Debug, Clone, PartialEq)]
pub struct DistPoint {
    pub x_label: String,
    pub average: f64,
    pub lower80: f64,
    pub upper80: f64,
}

impl From<&ToughnessNode> for DistPoint {
    fn from(node: &ToughnessNode) -> Self {
        Self {
            x_label: node.toughness.to_string(),
            average: node.average,
            lower80: node.lower80,
            upper80: node.upper80,
        }
    }
}

impl From<&SaveNode> for DistPoint {
    fn from(node: &SaveNode) -> Self {
        Self {
            x_label: node.save_label.clone(),
            average: node.average,
            lower80: node.lower80,
            upper80: node.upper80,
        }
    }
}

pub fn toughness_points(nodes: &[ToughnessNode]) -> Vec<DistPoint> {
    nodes.iter().map(DistPoint::from).collect()
}

pub fn save_points(nodes: &[SaveNode]) -> Vec<DistPoint> {
    nodes.iter().map(DistPoint::from).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub value: f64,
    pub y: f64,
    /// One decimal place.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandChart {
    pub ceiling: f64,
    /// Closed outline: upper bounds left to right, then lower bounds right
    /// to left. Empty for an empty series.
    pub band: Vec<Point>,
    pub average_line: Vec<Point>,
    pub gridlines: Vec<Gridline>,
    pub ticks: Vec<AxisTick>,
}

/// Highest upper bound plus 10% headroom.
pub fn ceiling(points: &[DistPoint]) -> f64 {
    let max = points
        .iter()
        .map(|p| p.upper80)
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    // max / 10 is exact for whole numbers where max * 1.1 is not.
    let ceiling = max + max / 10.0;
    if ceiling.is_finite() && ceiling > 0.0 {
        ceiling
    } else {
        DEFAULT_CEILING
    }
}

pub fn band_chart(points: &[DistPoint], frame: &Frame) -> BandChart {
    let ceiling = ceiling(points);
    let count = points.len();
    let at = |i: usize, v: f64| frame.point(i, count, v, ceiling);

    let band = points
        .iter()
        .enumerate()
        .map(|(i, p)| at(i, p.upper80))
        .chain(points.iter().enumerate().rev().map(|(i, p)| at(i, p.lower80)))
        .collect();

    let average_line = points
        .iter()
        .enumerate()
        .map(|(i, p)| at(i, p.average))
        .collect();

    let gridlines = (0..GRIDLINE_COUNT)
        .map(|i| {
            let value = ceiling / (GRIDLINE_COUNT - 1) as f64 * i as f64;
            Gridline {
                value,
                y: frame.y_for(value, ceiling),
                label: format!("{:.1}", value),
            }
        })
        .collect();

    let ticks = points
        .iter()
        .enumerate()
        .map(|(i, p)| AxisTick {
            x: frame.x_at_index(i, count),
            label: p.x_label.clone(),
        })
        .collect();

    BandChart {
        ceiling,
        band,
        average_line,
        gridlines,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, avg: f64, lo: f64, hi: f64) -> DistPoint {
        DistPoint {
            x_label: label.to_string(),
            average: avg,
            lower80: lo,
            upper80: hi,
        }
    }

    #[test]
    fn test_band_walks_upper_then_lower() {
        let pts = vec![point("3", 5.0, 2.0, 8.0), point("4", 4.0, 1.0, 10.0)];
        let chart = band_chart(&pts, &Frame::BAND);
        assert_eq!(chart.ceiling, 11.0);
        assert_eq!(chart.band.len(), 4);
        assert_eq!(chart.band[0].x, 100.0);
        assert_eq!(chart.band[1].x, 980.0);
        assert_eq!(chart.band[2].x, 980.0);
        assert_eq!(chart.band[3].x, 100.0);
        assert!(chart.band[1].y < chart.band[2].y);
    }

    #[test]
    fn test_save_points_keep_labels() {
        let nodes = vec![SaveNode {
            save_label: "3+".into(),
            average: 2.0,
            lower80: 1.0,
            upper80: 3.0,
        }];
        assert_eq!(save_points(&nodes)[0].x_label, "3+");
    }
}

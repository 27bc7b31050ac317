//! Probability array → bar chart.
//!
//! Pipeline: trim negligible tails, bucket down to at most
//! [`MAX_VISIBLE_BARS`], label each bar with its absolute outcome index.

use std::ops::RangeInclusive;

/// Probabilities at or below this are treated as negligible.
pub const SIGNIFICANCE_THRESHOLD: f64 = 1e-4;
pub const MAX_VISIBLE_BARS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarChart {
    pub bars: Vec<ChartBar>,
    /// Outcomes merged into each bar; 1 when not bucketed.
    pub bucket_size: usize,
    /// Largest bar value, floored at [`SIGNIFICANCE_THRESHOLD`].
    pub max: f64,
}

impl BarChart {
    pub fn from_distribution(probabilities: &[f64]) -> Self {
        let (bars, bucket_size) = bucketed_bars(probabilities);
        let max = display_max(&bars);
        Self {
            bars,
            bucket_size,
            max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bar height as a fraction of the tallest bar.
    pub fn height_ratio(&self, index: usize) -> f64 {
        self.bars
            .get(index)
            .map(|b| (b.value / self.max).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    pub fn show_label(&self, index: usize) -> bool {
        show_label(index, self.bars.len())
    }
}

/// Inclusive index span whose values exceed the threshold. When nothing
/// exceeds it the whole array counts as significant. Empty and all-zero
/// arrays have no significant range.
pub fn significant_range(probabilities: &[f64]) -> Option<RangeInclusive<usize>> {
    if probabilities.iter().all(|p| *p == 0.0) {
        return None;
    }

    let is_significant = |p: &f64| *p > SIGNIFICANCE_THRESHOLD;
    let first = probabilities.iter().position(is_significant);
    let last = probabilities.iter().rposition(is_significant);

    match (first, last) {
        (Some(first), Some(last)) => Some(first..=last),
        _ => Some(0..=probabilities.len() - 1),
    }
}

pub fn to_bars(probabilities: &[f64]) -> Vec<ChartBar> {
    bucketed_bars(probabilities).0
}

fn bucketed_bars(probabilities: &[f64]) -> (Vec<ChartBar>, usize) {
    let Some(range) = significant_range(probabilities) else {
        return (Vec::new(), 1);
    };
    let offset = *range.start();
    let trimmed = &probabilities[range];

    if trimmed.len() <= MAX_VISIBLE_BARS {
        let bars = trimmed
            .iter()
            .enumerate()
            .map(|(i, p)| ChartBar {
                label: (offset + i).to_string(),
                value: *p,
            })
            .collect();
        return (bars, 1);
    }

    // Bars hold the chunk sum so total probability is preserved.
    let bucket_size = trimmed.len().div_ceil(MAX_VISIBLE_BARS);
    let bars = trimmed
        .chunks(bucket_size)
        .enumerate()
        .map(|(i, chunk)| ChartBar {
            label: (offset + i * bucket_size).to_string(),
            value: chunk.iter().sum(),
        })
        .collect();
    (bars, bucket_size)
}

pub fn display_max(bars: &[ChartBar]) -> f64 {
    bars.iter()
        .map(|b| b.value)
        .fold(SIGNIFICANCE_THRESHOLD, f64::max)
}

/// Thins tick labels so they do not overlap: all of them up to 15 bars,
/// every 5th up to 30, every 10th beyond.
pub fn show_label(index: usize, total: usize) -> bool {
    if total <= 15 {
        true
    } else if total <= 30 {
        index % 5 == 0
    } else {
        index % 10 == 0
    }
}

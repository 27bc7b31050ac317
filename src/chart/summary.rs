use super::bars::SIGNIFICANCE_THRESHOLD;
use crate::protocol::{CalcResult, Quantity};

const P10: f64 = 0.10;
const P90: f64 = 0.90;
const P95: f64 = 0.95;
/// Ranges longer than this get the compact tile style.
const LONG_VALUE_LEN: usize = 3;

/// One headline figure shown next to a distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTile {
    pub label: String,
    pub value: String,
    pub sub: String,
    pub long_value: bool,
}

/// The four tiles for `quantity`: average, chance of reaching it, the 80%
/// range and the top 5% range. Empty when the distribution is empty.
pub fn stat_tiles(result: &CalcResult, quantity: Quantity) -> Vec<StatTile> {
    let distribution = result.distribution(quantity);
    if distribution.is_empty() {
        return Vec::new();
    }

    let stats = result.stats(quantity);
    // `+ 0.0` folds a rounded -0 into 0 so it never prints as "-0".
    let avg = stats.avg_value.round() + 0.0;
    let prob_at_avg = if avg < 0.0 || !avg.is_finite() {
        0.0
    } else {
        let index = (avg as usize).min(distribution.len() - 1);
        (distribution[index] * 100.0).round()
    };

    vec![
        StatTile {
            label: format!("Avg {}", quantity),
            value: format!("{}", avg),
            sub: format!("{}% Probability", prob_at_avg),
            long_value: false,
        },
        StatTile {
            label: "Prob ≥ Avg".to_string(),
            value: format!("{}%", stats.prob_at_least_avg.round() + 0.0),
            sub: "Success".to_string(),
            long_value: false,
        },
        StatTile {
            label: "80% Range".to_string(),
            long_value: stats.range80.chars().count() > LONG_VALUE_LEN,
            value: stats.range80,
            sub: "Reliability".to_string(),
        },
        StatTile {
            label: "Top 5%".to_string(),
            long_value: stats.range_top5.chars().count() > LONG_VALUE_LEN,
            value: stats.range_top5,
            sub: "Lucky Roll".to_string(),
        },
    ]
}

/// Statistics computed locally from a probability array indexed by
/// outcome count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub p10: usize,
    pub p90: usize,
    pub p95: usize,
    /// Highest outcome with non-negligible probability, 0 if none.
    pub absolute_max: usize,
    pub prob_at_least_mean: f64,
}

impl DistributionSummary {
    pub fn from_probabilities(probabilities: &[f64]) -> Option<Self> {
        if probabilities.is_empty() || probabilities.iter().all(|p| *p == 0.0) {
            return None;
        }

        let mean: f64 = probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| i as f64 * p)
            .sum();
        let variance: f64 = probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| p * (i as f64 - mean).powi(2))
            .sum();

        let absolute_max = probabilities
            .iter()
            .rposition(|p| *p > SIGNIFICANCE_THRESHOLD)
            .unwrap_or(0);

        let prob_at_least_mean: f64 = probabilities
            .iter()
            .enumerate()
            .filter(|(i, _)| *i as f64 >= mean)
            .map(|(_, p)| p)
            .sum();

        Some(Self {
            mean,
            std_dev: variance.max(0.0).sqrt(),
            p10: percentile(probabilities, P10),
            p90: percentile(probabilities, P90),
            p95: percentile(probabilities, P95),
            absolute_max,
            prob_at_least_mean,
        })
    }

    pub fn range80(&self) -> String {
        format!("{} - {}", self.p10, self.p90)
    }

    pub fn range_top5(&self) -> String {
        format!("{} - {}", self.p95, self.absolute_max)
    }

    /// Mean ± one standard deviation, floored at zero.
    pub fn range_std(&self) -> String {
        let low = (self.mean - self.std_dev).round().max(0.0);
        let high = (self.mean + self.std_dev).round();
        format!("{} - {}", low, high)
    }
}

/// First index whose cumulative probability reaches `threshold`, or the
/// last index when rounding keeps the total below it.
fn percentile(probabilities: &[f64], threshold: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative >= threshold {
            return i;
        }
    }
    probabilities.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_fair_coin_pair() {
        let s = DistributionSummary::from_probabilities(&[0.25, 0.5, 0.25]).unwrap();
        assert_eq!(s.mean, 1.0);
        assert!((s.std_dev - 0.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.p10, 0);
        assert_eq!(s.p90, 2);
        assert_eq!(s.absolute_max, 2);
        assert_eq!(s.prob_at_least_mean, 0.75);
        assert_eq!(s.range80(), "0 - 2");
        assert_eq!(s.range_std(), "0 - 2");
    }

    #[test]
    fn test_summary_rejects_empty() {
        assert!(DistributionSummary::from_probabilities(&[]).is_none());
        assert!(DistributionSummary::from_probabilities(&[0.0, 0.0]).is_none());
    }
}

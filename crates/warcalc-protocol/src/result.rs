use crate::scaling::{SaveNode, ToughnessNode};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

const EMPTY_RANGE: &str = "0 - 0";

/// The three quantities the engine measures along the attack sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum Quantity {
    Hits,
    Wounds,
    Damage,
}

/// Response body of the calculation engine.
///
/// Hit fields read a missing or `null` value as empty/zero. Wound and
/// damage fields are optional on the wire; see [`CalcResult::stats`] for
/// how absent values resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcResult {
    // === HITS ===
    #[serde(deserialize_with = "null_as_default")]
    pub probabilities: Vec<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub avg_value: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub avg_prob: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub range80: String,
    #[serde(deserialize_with = "null_as_default")]
    pub range_top5: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prob_at_least_avg: f64,
    pub range_std: Option<String>,
    pub max_hits: Option<u32>,

    // === WOUNDS ===
    pub wound_probabilities: Option<Vec<f64>>,
    pub wound_avg_value: Option<f64>,
    pub wound_range80: Option<String>,
    pub wound_range_top5: Option<String>,
    pub wound_prob_at_least_avg: Option<f64>,

    // === DAMAGE ===
    pub damage_probabilities: Option<Vec<f64>>,
    pub damage_avg_value: Option<f64>,
    pub damage_range80: Option<String>,
    pub damage_range_top5: Option<String>,
    pub damage_prob_at_least_avg: Option<f64>,

    // === SCALING ===
    pub toughness_scaling: Option<Vec<ToughnessNode>>,
    pub save_scaling: Option<Vec<SaveNode>>,
}

/// Scalar summaries for one quantity, with fallbacks already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityStats {
    pub avg_value: f64,
    pub prob_at_least_avg: f64,
    pub range80: String,
    pub range_top5: String,
}

impl CalcResult {
    pub fn distribution(&self, quantity: Quantity) -> &[f64] {
        match quantity {
            Quantity::Hits => &self.probabilities,
            Quantity::Wounds => self.wound_probabilities.as_deref().unwrap_or(&[]),
            Quantity::Damage => self.damage_probabilities.as_deref().unwrap_or(&[]),
        }
    }

    /// Wounds fall back to the hit figures when the engine omits them;
    /// damage falls back to zero.
    pub fn stats(&self, quantity: Quantity) -> QuantityStats {
        match quantity {
            Quantity::Hits => QuantityStats {
                avg_value: self.avg_value,
                prob_at_least_avg: self.prob_at_least_avg,
                range80: range_or_empty(&self.range80),
                range_top5: range_or_empty(&self.range_top5),
            },
            Quantity::Wounds => QuantityStats {
                avg_value: self.wound_avg_value.unwrap_or(self.avg_value),
                prob_at_least_avg: self.wound_prob_at_least_avg.unwrap_or(self.prob_at_least_avg),
                range80: range_or_empty(self.wound_range80.as_deref().unwrap_or(&self.range80)),
                range_top5: range_or_empty(
                    self.wound_range_top5.as_deref().unwrap_or(&self.range_top5),
                ),
            },
            Quantity::Damage => QuantityStats {
                avg_value: self.damage_avg_value.unwrap_or(0.0),
                prob_at_least_avg: self.damage_prob_at_least_avg.unwrap_or(0.0),
                range80: range_or_empty(self.damage_range80.as_deref().unwrap_or("")),
                range_top5: range_or_empty(self.damage_range_top5.as_deref().unwrap_or("")),
            },
        }
    }

    pub fn toughness_scaling(&self) -> &[ToughnessNode] {
        self.toughness_scaling.as_deref().unwrap_or(&[])
    }

    pub fn save_scaling(&self) -> &[SaveNode] {
        self.save_scaling.as_deref().unwrap_or(&[])
    }
}

/// Reads `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn range_or_empty(range: &str) -> String {
    if range.is_empty() {
        EMPTY_RANGE.to_string()
    } else {
        range.to_string()
    }
}

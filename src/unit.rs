//! Roster entries.
//!
//! Persisted rosters may come from older clients or hand edits, so every
//! field deserializes leniently: unknown shapes collapse to the field's
//! default instead of failing the whole roster.

use crate::protocol::RerollPolicy;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

pub type UnitId = u64;

pub const MIN_CRIT_THRESHOLD: u8 = 2;
pub const MAX_CRIT_THRESHOLD: u8 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Unit {
    #[serde(
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<UnitId>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Free text; blank is allowed.
    #[serde(deserialize_with = "lenient_string")]
    pub points: String,
    pub stats: UnitStats,
    pub toggles: Toggles,
}

/// Stat line as typed by the user. Parsed only when building a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitStats {
    #[serde(deserialize_with = "lenient_string")]
    pub models: String,
    #[serde(deserialize_with = "lenient_string")]
    pub attacks: String,
    /// Ballistic or weapon skill, usually written "3+".
    #[serde(deserialize_with = "lenient_string")]
    pub bs_ws: String,
    #[serde(deserialize_with = "lenient_string")]
    pub strength: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ap: String,
    #[serde(deserialize_with = "lenient_string")]
    pub damage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Toggles {
    #[serde(deserialize_with = "lenient_flag")]
    pub lethal_hits: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub devastating_wounds: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub plus_one_to_hit: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub plus_one_to_wound: bool,
    pub sustained_hits: SustainedHits,
    #[serde(deserialize_with = "lenient_reroll")]
    pub reroll_hits: RerollPolicy,
    #[serde(deserialize_with = "lenient_reroll")]
    pub reroll_wounds: RerollPolicy,
    #[serde(
        deserialize_with = "lenient_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub crit_hit: Option<u8>,
    #[serde(
        deserialize_with = "lenient_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub crit_wound: Option<u8>,
}

/// Sustained Hits is either off, on with the implicit value 1, or on with
/// an explicit value that may be dice notation ("D3").
///
/// Stored as `false`, `true` or the value string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SustainedHits {
    #[default]
    Off,
    On,
    Value(String),
}

impl SustainedHits {
    /// Blank input means "on" without an explicit value.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            SustainedHits::On
        } else {
            SustainedHits::Value(trimmed.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, SustainedHits::Off)
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) if s.trim().is_empty() => SustainedHits::Off,
            Value::String(s) => SustainedHits::Value(s.trim().to_string()),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => {
                SustainedHits::Value(n.to_string())
            }
            other if is_truthy(other) && !other.is_number() => SustainedHits::On,
            _ => SustainedHits::Off,
        }
    }
}

impl Serialize for SustainedHits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SustainedHits::Off => serializer.serialize_bool(false),
            SustainedHits::On => serializer.serialize_bool(true),
            SustainedHits::Value(v) => serializer.serialize_str(v),
        }
    }
}

impl<'de> Deserialize<'de> for SustainedHits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(SustainedHits::from_json(&value))
    }
}

/// Accepts a threshold only when it is an integer from 2 to 6.
pub fn valid_threshold(value: i64) -> Option<u8> {
    let min = i64::from(MIN_CRIT_THRESHOLD);
    let max = i64::from(MAX_CRIT_THRESHOLD);
    if (min..=max).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}

// === LENIENT FIELD DECODERS ===

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn lenient_reroll<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RerollPolicy, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| RerollPolicy::from_str(s).ok())
        .unwrap_or_default())
}

fn lenient_threshold<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u8>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().and_then(valid_threshold),
        Value::String(s) => s.trim().parse::<i64>().ok().and_then(valid_threshold),
        _ => None,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<UnitId>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 1.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .filter(|id| *id > 0))
}

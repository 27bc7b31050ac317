use crate::result::null_as_default;
use serde::{Deserialize, Serialize};

/// Mean and 80% band of the measured quantity against one target toughness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToughnessNode {
    #[serde(deserialize_with = "null_as_default")]
    pub toughness: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lower80: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upper80: f64,
}

/// Mean and 80% band against one target save ("2+", "3+", ..., "None").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaveNode {
    #[serde(deserialize_with = "null_as_default")]
    pub save_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lower80: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upper80: f64,
}

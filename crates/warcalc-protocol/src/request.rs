use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Critical threshold used when a unit does not configure one.
pub const DEFAULT_CRIT_VALUE: u8 = 6;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RerollPolicy {
    #[default]
    None,
    Ones,
    Fail,
    All,
}

/// One unit's entry in the array posted to the calculation engine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub unit_name: String,
    pub number_of_models: i32,
    pub attacks_per_model: i32,
    pub bs_value: i32,
    pub strength: i32,
    pub ap: i32,
    /// Raw damage stat; the engine parses dice notation ("D3", "2D6+1").
    pub damage_value: String,

    pub lethal_hits: bool,
    pub devastating_wounds: bool,
    pub plus_one_to_hit: bool,
    pub plus_one_to_wound: bool,

    pub sustained_hits: bool,
    pub sustained_value: String,

    pub reroll_type: RerollPolicy,
    pub wound_reroll_type: RerollPolicy,

    pub crit_hit_value: u8,
    pub crit_wound_value: u8,
}

impl Default for CalculationRequest {
    fn default() -> Self {
        Self {
            unit_name: String::new(),
            number_of_models: 0,
            attacks_per_model: 0,
            bs_value: 0,
            strength: 4,
            ap: 0,
            damage_value: "1".to_string(),
            lethal_hits: false,
            devastating_wounds: false,
            plus_one_to_hit: false,
            plus_one_to_wound: false,
            sustained_hits: false,
            sustained_value: "0".to_string(),
            reroll_type: RerollPolicy::None,
            wound_reroll_type: RerollPolicy::None,
            crit_hit_value: DEFAULT_CRIT_VALUE,
            crit_wound_value: DEFAULT_CRIT_VALUE,
        }
    }
}

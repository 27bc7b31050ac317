//! Unit → calculation request mapping.
//!
//! Total over its input: every field has a fallback, so no roster content
//! can make payload construction fail.

use crate::protocol::{CalculationRequest, DEFAULT_CRIT_VALUE};
use crate::unit::{SustainedHits, Unit};

pub const UNNAMED_UNIT: &str = "Unnamed Unit";
pub const DEFAULT_STRENGTH: i32 = 4;
pub const DEFAULT_DAMAGE: &str = "1";

pub fn to_payload(units: &[Unit]) -> Vec<CalculationRequest> {
    units.iter().map(to_request).collect()
}

pub fn to_request(unit: &Unit) -> CalculationRequest {
    let stats = &unit.stats;
    let toggles = &unit.toggles;

    let name = unit.name.trim();
    let damage = stats.damage.trim();

    let (sustained_hits, sustained_value) = match &toggles.sustained_hits {
        SustainedHits::Off => (false, "0".to_string()),
        SustainedHits::On => (true, "1".to_string()),
        SustainedHits::Value(v) => (true, v.clone()),
    };

    CalculationRequest {
        unit_name: if name.is_empty() {
            UNNAMED_UNIT.to_string()
        } else {
            name.to_string()
        },
        number_of_models: parse_leading_int(&stats.models).unwrap_or(0),
        attacks_per_model: parse_leading_int(&stats.attacks).unwrap_or(0),
        bs_value: parse_digits(&stats.bs_ws).unwrap_or(0),
        strength: parse_leading_int(&stats.strength).unwrap_or(DEFAULT_STRENGTH),
        ap: parse_leading_int(&stats.ap).unwrap_or(0),
        damage_value: if damage.is_empty() {
            DEFAULT_DAMAGE.to_string()
        } else {
            damage.to_string()
        },

        lethal_hits: toggles.lethal_hits,
        devastating_wounds: toggles.devastating_wounds,
        plus_one_to_hit: toggles.plus_one_to_hit,
        plus_one_to_wound: toggles.plus_one_to_wound,

        sustained_hits,
        sustained_value,

        reroll_type: toggles.reroll_hits,
        wound_reroll_type: toggles.reroll_wounds,

        crit_hit_value: toggles.crit_hit.unwrap_or(DEFAULT_CRIT_VALUE),
        crit_wound_value: toggles.crit_wound.unwrap_or(DEFAULT_CRIT_VALUE),
    }
}

/// Reads an optional sign and the digits that follow it, ignoring leading
/// whitespace and anything after the digits ("10 models" → 10, "-1" → -1).
/// Saturates at the `i32` bounds.
pub fn parse_leading_int(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: Vec<i64> = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .iter()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(*d));
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Skill is written "3+"; strip everything that is not a digit first.
pub fn parse_digits(raw: &str) -> Option<i32> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    parse_leading_int(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("10"), Some(10));
        assert_eq!(parse_leading_int("  7 attacks"), Some(7));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int("D6"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i32::MAX));
    }

    #[test]
    fn test_parse_digits_strips_skill_suffix() {
        assert_eq!(parse_digits("3+"), Some(3));
        assert_eq!(parse_digits("WS 2+"), Some(2));
        assert_eq!(parse_digits("+"), None);
    }
}

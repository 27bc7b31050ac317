use crate::error::WcResult;
use crate::mapper::parse_leading_int;
use crate::reactive::{Subscriber, Subscribers, Subscription};
use crate::storage::KeyValueStore;
use crate::unit::{Unit, UnitId};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashSet;
use std::f64::consts::PI;
use std::rc::Rc;
use tracing::{debug, error, warn};

pub const PROGRESS_RING_RADIUS: f64 = 18.0;

/// Read-only view of the roster at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterSnapshot {
    pub units: Vec<Unit>,
    /// Already resolved against `units`; a stale selection reads as `None`.
    pub selected: Option<Unit>,
}

impl RosterSnapshot {
    /// Units submitted for calculation: the selected unit alone, or the
    /// whole roster when nothing is selected.
    pub fn calculation_units(&self) -> Vec<Unit> {
        match &self.selected {
            Some(unit) => vec![unit.clone()],
            None => self.units.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct RosterState {
    units: Vec<Unit>,
    selected: Option<UnitId>,
    /// Highest id this store has ever held. Fresh ids start above it.
    high_water: UnitId,
}

impl RosterState {
    fn position(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|u| u.id == Some(id))
    }

    /// Counts up from the highest id seen. Once that reaches `UnitId::MAX`
    /// the lowest id not currently in the roster is handed out instead.
    fn fresh_id(&mut self) -> UnitId {
        match self.high_water.checked_add(1) {
            Some(id) => {
                self.high_water = id;
                id
            }
            None => {
                let taken: HashSet<UnitId> = self.units.iter().filter_map(|u| u.id).collect();
                let id = lowest_unused(&taken);
                warn!("⚠️  Unit ids exhausted; reusing free id {}", id);
                id
            }
        }
    }

    fn resolve_selected(&self) -> Option<&Unit> {
        self.selected
            .and_then(|id| self.position(id))
            .map(|idx| &self.units[idx])
    }
}

/// Owns the ordered roster and the current selection.
///
/// Every roster mutation is written to the injected [`KeyValueStore`]
/// before subscribers are notified.
pub struct RosterStore {
    state: RefCell<RosterState>,
    storage: Rc<dyn KeyValueStore>,
    key: String,
    subscribers: Subscribers,
}

impl RosterStore {
    /// Loads whatever roster is stored under `key`. Missing or malformed
    /// data yields an empty roster.
    pub fn open(storage: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let units = match storage.get(&key) {
            Ok(Some(raw)) => parse_units(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("⚠️  Could not read roster '{}': {}", key, e);
                Vec::new()
            }
        };
        let high_water = units.iter().filter_map(|u| u.id).max().unwrap_or(0);
        debug!("📂 Loaded {} units from '{}'", units.len(), key);

        Self {
            state: RefCell::new(RosterState {
                units,
                selected: None,
                high_water,
            }),
            storage,
            key,
            subscribers: Subscribers::new(),
        }
    }

    pub fn subscribe(&self, subscriber: Subscriber) -> Subscription {
        self.subscribers.subscribe(subscriber)
    }

    /// Replaces the unit with the same id, or prepends it under a fresh id
    /// when its id is unset or unknown. Clears the selection.
    pub fn add(&self, mut unit: Unit) -> UnitId {
        let id = {
            let mut state = self.state.borrow_mut();
            let existing = unit.id.and_then(|id| state.position(id));
            let id = match existing {
                Some(idx) => {
                    let id = state.units[idx].id.unwrap_or_default();
                    state.units[idx] = unit;
                    debug!("✏️  Replaced unit {}", id);
                    id
                }
                None => {
                    let id = state.fresh_id();
                    unit.id = Some(id);
                    state.units.insert(0, unit);
                    debug!("➕ Added unit {}", id);
                    id
                }
            };
            state.selected = None;
            id
        };

        self.persist();
        self.subscribers.notify();
        id
    }

    /// Returns `false` when no unit has this id.
    pub fn remove(&self, id: UnitId) -> bool {
        {
            let mut state = self.state.borrow_mut();
            let Some(idx) = state.position(id) else {
                return false;
            };
            state.units.remove(idx);
            if state.selected == Some(id) {
                state.selected = None;
            }
            debug!("➖ Removed unit {}", id);
        }

        self.persist();
        self.subscribers.notify();
        true
    }

    pub fn select(&self, id: Option<UnitId>) {
        self.state.borrow_mut().selected = id;
        self.subscribers.notify();
    }

    /// Clicking the selected unit deselects it; clicking another selects it.
    pub fn toggle_selection(&self, id: UnitId) {
        let next = {
            let state = self.state.borrow();
            let current = state.resolve_selected().and_then(|u| u.id);
            if current == Some(id) || state.position(id).is_none() {
                None
            } else {
                Some(id)
            }
        };
        self.select(next);
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        let state = self.state.borrow();
        RosterSnapshot {
            units: state.units.clone(),
            selected: state.resolve_selected().cloned(),
        }
    }

    pub fn units(&self) -> Vec<Unit> {
        self.state.borrow().units.clone()
    }

    pub fn selected(&self) -> Option<Unit> {
        self.state.borrow().resolve_selected().cloned()
    }

    pub fn get(&self, id: UnitId) -> Option<Unit> {
        let state = self.state.borrow();
        state.position(id).map(|idx| state.units[idx].clone())
    }

    pub fn len(&self) -> usize {
        self.state.borrow().units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().units.is_empty()
    }

    pub fn points_progress(&self, limit: u32) -> PointsProgress {
        PointsProgress::new(points_total(&self.state.borrow().units), limit)
    }

    fn persist(&self) {
        let result = serialize_units(&self.state.borrow().units)
            .and_then(|json| self.storage.set(&self.key, &json));
        if let Err(e) = result {
            error!("❌ Failed to persist roster '{}': {}", self.key, e);
        }
    }
}

pub fn serialize_units(units: &[Unit]) -> WcResult<String> {
    Ok(serde_json::to_string(units)?)
}

/// Parses a persisted roster. Elements that are not unit objects are
/// skipped; missing or duplicate ids are reassigned above the highest id.
pub fn parse_units(raw: &str) -> Vec<Unit> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("⚠️  Stored roster is not an array; starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!("⚠️  Stored roster is not valid JSON ({}); starting empty", e);
            return Vec::new();
        }
    };

    let mut units: Vec<Unit> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Unit>(item) {
            Ok(unit) => Some(unit),
            Err(e) => {
                warn!("⚠️  Skipping malformed roster entry: {}", e);
                None
            }
        })
        .collect();

    let mut taken: HashSet<UnitId> = units.iter().filter_map(|u| u.id).collect();
    let mut next = taken.iter().copied().max().unwrap_or(0);
    let mut seen = HashSet::new();
    for unit in &mut units {
        let duplicate = unit.id.is_some_and(|id| !seen.insert(id));
        if unit.id.is_none() || duplicate {
            let id = match next.checked_add(1) {
                Some(id) => {
                    next = id;
                    id
                }
                None => lowest_unused(&taken),
            };
            unit.id = Some(id);
            seen.insert(id);
            taken.insert(id);
        }
    }
    units
}

fn lowest_unused(taken: &HashSet<UnitId>) -> UnitId {
    // A roster can never hold every id, so the search always ends.
    (1..=UnitId::MAX)
        .find(|id| !taken.contains(id))
        .unwrap_or(1)
}

/// Sum of every unit's points. Blank or unreadable entries count as 0.
pub fn points_total(units: &[Unit]) -> i64 {
    units
        .iter()
        .map(|u| i64::from(parse_leading_int(&u.points).unwrap_or(0)))
        .sum()
}

/// Points spent against the army limit, plus the progress-ring geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsProgress {
    pub total: i64,
    pub limit: u32,
    /// In [0, 1].
    pub ratio: f64,
    pub over_limit: bool,
}

impl PointsProgress {
    pub fn new(total: i64, limit: u32) -> Self {
        let ratio = if limit == 0 {
            if total > 0 {
                1.0
            } else {
                0.0
            }
        } else {
            (total as f64 / f64::from(limit)).clamp(0.0, 1.0)
        };

        Self {
            total,
            limit,
            ratio,
            over_limit: total > i64::from(limit),
        }
    }

    pub fn percent(&self) -> u32 {
        (self.ratio * 100.0).round() as u32
    }

    pub fn circumference(radius: f64) -> f64 {
        2.0 * PI * radius
    }

    /// Stroke dash offset of a ring of `radius`: full circumference when
    /// empty, zero when the limit is reached.
    pub fn ring_offset(&self, radius: f64) -> f64 {
        Self::circumference(radius) * (1.0 - self.ratio)
    }
}

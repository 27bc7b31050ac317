#![allow(dead_code)]

use std::rc::Rc;
use warcalc::protocol::RerollPolicy;
use warcalc::roster::RosterStore;
use warcalc::storage::{KeyValueStore, MemoryStore};
use warcalc::unit::{SustainedHits, Unit, UnitId};

pub const KEY: &str = "warhammer_army";

/// Builder for Unit to keep tests short
pub struct UnitBuilder {
    unit: Unit,
}

impl UnitBuilder {
    pub fn new(name: &str) -> Self {
        let mut unit = Unit {
            name: name.to_string(),
            ..Default::default()
        };
        unit.stats.models = "10".to_string();
        unit.stats.attacks = "2".to_string();
        unit.stats.bs_ws = "4+".to_string();
        Self { unit }
    }

    pub fn id(mut self, id: UnitId) -> Self {
        self.unit.id = Some(id);
        self
    }

    pub fn points(mut self, points: &str) -> Self {
        self.unit.points = points.to_string();
        self
    }

    pub fn models(mut self, models: &str) -> Self {
        self.unit.stats.models = models.to_string();
        self
    }

    pub fn attacks(mut self, attacks: &str) -> Self {
        self.unit.stats.attacks = attacks.to_string();
        self
    }

    pub fn skill(mut self, skill: &str) -> Self {
        self.unit.stats.bs_ws = skill.to_string();
        self
    }

    pub fn strength(mut self, strength: &str) -> Self {
        self.unit.stats.strength = strength.to_string();
        self
    }

    pub fn damage(mut self, damage: &str) -> Self {
        self.unit.stats.damage = damage.to_string();
        self
    }

    pub fn lethal(mut self) -> Self {
        self.unit.toggles.lethal_hits = true;
        self
    }

    pub fn sustained(mut self, value: SustainedHits) -> Self {
        self.unit.toggles.sustained_hits = value;
        self
    }

    pub fn reroll_hits(mut self, policy: RerollPolicy) -> Self {
        self.unit.toggles.reroll_hits = policy;
        self
    }

    pub fn crit_hit(mut self, threshold: u8) -> Self {
        self.unit.toggles.crit_hit = Some(threshold);
        self
    }

    pub fn build(self) -> Unit {
        self.unit
    }
}

/// Store backed by a fresh in-memory key/value store.
pub fn memory_roster() -> (Rc<MemoryStore>, RosterStore) {
    let backing = Rc::new(MemoryStore::new());
    let storage: Rc<dyn KeyValueStore> = backing.clone();
    (backing, RosterStore::open(storage, KEY))
}

/// Store pre-seeded with `raw` under the roster key.
pub fn roster_from_raw(raw: &str) -> RosterStore {
    let storage: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::with_entry(KEY, raw));
    RosterStore::open(storage, KEY)
}

pub mod calc;
pub mod payload;
pub mod roster;

use warcalc::error::{WarcalcError, WcResult};
use warcalc::roster::RosterStore;
use warcalc::unit::UnitId;

/// Selects `unit` for a single-unit run. Unknown ids are a usage error.
pub fn focus_unit(store: &RosterStore, unit: Option<UnitId>) -> WcResult<()> {
    if let Some(id) = unit {
        if store.get(id).is_none() {
            return Err(WarcalcError::Config(format!("No unit with id {}", id)));
        }
        store.select(Some(id));
    }
    Ok(())
}

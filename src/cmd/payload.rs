use super::focus_unit;
use clap::Args;
use warcalc::error::WcResult;
use warcalc::mapper::to_payload;
use warcalc::roster::RosterStore;
use warcalc::unit::UnitId;

#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// Only this unit, as in a single-unit calculation.
    #[arg(short, long)]
    pub unit: Option<UnitId>,
}

pub fn run(args: PayloadArgs, store: &RosterStore) -> WcResult<()> {
    focus_unit(store, args.unit)?;
    let requests = to_payload(&store.snapshot().calculation_units());
    println!("{}", serde_json::to_string_pretty(&requests)?);
    Ok(())
}

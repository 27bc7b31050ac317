use crate::reports;
use clap::{Args, Subcommand};
use tracing::info;
use warcalc::config::Config;
use warcalc::error::WcResult;
use warcalc::protocol::RerollPolicy;
use warcalc::roster::RosterStore;
use warcalc::unit::{SustainedHits, Toggles, Unit, UnitId, UnitStats};

#[derive(Args, Debug, Clone)]
pub struct RosterArgs {
    #[command(subcommand)]
    pub action: RosterAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RosterAction {
    /// Show every unit and the points total.
    List,
    /// Add a unit, or replace the one with `--id`.
    Add(AddArgs),
    /// Delete a unit by id.
    Remove { id: UnitId },
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Replace this unit instead of adding a new one.
    #[arg(long)]
    pub id: Option<UnitId>,

    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub points: String,

    // === STATS ===
    #[arg(long, default_value = "")]
    pub models: String,
    #[arg(long, default_value = "")]
    pub attacks: String,
    /// Ballistic or weapon skill, e.g. "3+".
    #[arg(long, default_value = "")]
    pub skill: String,
    #[arg(long, default_value = "")]
    pub strength: String,
    #[arg(long, default_value = "")]
    pub ap: String,
    /// Flat value or dice notation ("D6+1").
    #[arg(long, default_value = "")]
    pub damage: String,

    // === TOGGLES ===
    #[arg(long)]
    pub lethal_hits: bool,
    #[arg(long)]
    pub devastating_wounds: bool,
    #[arg(long)]
    pub plus_one_hit: bool,
    #[arg(long)]
    pub plus_one_wound: bool,
    /// Sustained Hits, optionally with a value ("2", "D3").
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub sustained: Option<String>,
    #[arg(long, default_value_t = RerollPolicy::None)]
    pub reroll_hits: RerollPolicy,
    #[arg(long, default_value_t = RerollPolicy::None)]
    pub reroll_wounds: RerollPolicy,
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=6))]
    pub crit_hit: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=6))]
    pub crit_wound: Option<u8>,
}

impl AddArgs {
    pub fn to_unit(&self) -> Unit {
        Unit {
            id: self.id,
            name: self.name.clone(),
            points: self.points.clone(),
            stats: UnitStats {
                models: self.models.clone(),
                attacks: self.attacks.clone(),
                bs_ws: self.skill.clone(),
                strength: self.strength.clone(),
                ap: self.ap.clone(),
                damage: self.damage.clone(),
            },
            toggles: Toggles {
                lethal_hits: self.lethal_hits,
                devastating_wounds: self.devastating_wounds,
                plus_one_to_hit: self.plus_one_hit,
                plus_one_to_wound: self.plus_one_wound,
                sustained_hits: self
                    .sustained
                    .as_deref()
                    .map(SustainedHits::from_input)
                    .unwrap_or_default(),
                reroll_hits: self.reroll_hits,
                reroll_wounds: self.reroll_wounds,
                crit_hit: self.crit_hit,
                crit_wound: self.crit_wound,
            },
        }
    }
}

pub fn run(args: RosterArgs, store: &RosterStore, config: &Config) -> WcResult<()> {
    match args.action {
        RosterAction::List => {
            if store.is_empty() {
                println!("Roster is empty.");
            } else {
                info!("📋 {} units in '{}'", store.len(), config.storage_key);
                reports::print_roster(&store.units());
            }
            reports::print_points(&store.points_progress(config.points_limit));
        }
        RosterAction::Add(add) => {
            let id = store.add(add.to_unit());
            info!("💾 Saved unit {}", id);
            println!("{}", id);
        }
        RosterAction::Remove { id } => {
            if store.remove(id) {
                info!("🗑️  Removed unit {}", id);
            } else {
                info!("No unit with id {}; nothing removed", id);
            }
        }
    }
    Ok(())
}

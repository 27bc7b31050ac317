use super::focus_unit;
use crate::reports;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use strum::IntoEnumIterator;
use tracing::{info, warn};
use warcalc::chart::svg::{band_document, BandLabels};
use warcalc::chart::{band_chart, ChartKind, DistributionView, Frame};
use warcalc::config::Config;
use warcalc::engine::HttpEngine;
use warcalc::error::WcResult;
use warcalc::orchestrator::Orchestrator;
use warcalc::protocol::CalcResult;
use warcalc::roster::RosterStore;
use warcalc::storage::atomic_write;
use warcalc::unit::UnitId;

#[derive(Args, Debug, Clone)]
pub struct CalcArgs {
    /// Calculate for this unit alone instead of the whole army.
    #[arg(short, long)]
    pub unit: Option<UnitId>,

    /// Also write the scaling charts as SVG files into this directory.
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

pub fn run(args: CalcArgs, store: &RosterStore, config: &Config) -> WcResult<()> {
    focus_unit(store, args.unit)?;
    let snapshot = store.snapshot();

    let engine = HttpEngine::from_config(config)?;
    info!("🚀 Calculating via {}", engine.url());
    let orchestrator = Orchestrator::new(Rc::new(engine));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, orchestrator.run_pass(&snapshot));

    let Some(result) = orchestrator.result() else {
        match orchestrator.last_error() {
            Some(e) => println!("No result: {}", e),
            None => println!("No result: the roster is empty."),
        }
        return Ok(());
    };

    let selected = snapshot.selected.as_ref().map(|u| u.name.as_str());
    for kind in ChartKind::iter() {
        let title = kind.title(selected);
        match kind.quantity() {
            Some(quantity) => {
                reports::print_distribution(&title, &DistributionView::new(&result, quantity))
            }
            None => reports::print_scaling(&title, kind, &kind.scaling_points(&result)),
        }
    }

    if let Some(dir) = &args.svg {
        write_svgs(dir, &result, selected)?;
    }
    Ok(())
}

fn write_svgs(dir: &Path, result: &CalcResult, selected: Option<&str>) -> WcResult<()> {
    fs::create_dir_all(dir)?;
    for kind in [ChartKind::ToughnessScaling, ChartKind::SaveScaling] {
        let points = kind.scaling_points(result);
        if points.is_empty() {
            warn!("⚠️  No data for {}; skipping SVG", kind);
            continue;
        }
        let Some((x_axis, y_axis)) = kind.axis_labels() else {
            continue;
        };

        let frame = Frame::BAND;
        let title = kind.title(selected);
        let document = band_document(
            &band_chart(&points, &frame),
            &frame,
            &BandLabels {
                title: &title,
                x_axis,
                y_axis,
            },
        );

        let path = dir.join(format!("{}.svg", file_stem(kind)));
        atomic_write(&path, document)?;
        info!("🖼️  Wrote {}", path.display());
    }
    Ok(())
}

fn file_stem(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Hits => "hits",
        ChartKind::Wounds => "wounds",
        ChartKind::Damage => "damage",
        ChartKind::ToughnessScaling => "toughness_scaling",
        ChartKind::SaveScaling => "save_scaling",
    }
}

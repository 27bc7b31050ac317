//! Turns calculation results into drawable, bounded chart primitives.
//!
//! Everything here is pure and total: empty or degenerate input produces
//! an empty or flat chart, never an error.

pub mod band;
pub mod bars;
pub mod curve;
pub mod frame;
pub mod summary;
pub mod svg;

pub use band::{band_chart, BandChart, DistPoint};
pub use bars::{BarChart, ChartBar};
pub use curve::{deviation_markers, gaussian_curve, DeviationMarker, Spread};
pub use frame::{Frame, Padding, Point};
pub use summary::{stat_tiles, DistributionSummary, StatTile};

use crate::protocol::{CalcResult, Quantity};
use strum_macros::{Display, EnumIter};

/// The charts shown for a calculation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ChartKind {
    Hits,
    Wounds,
    Damage,
    ToughnessScaling,
    SaveScaling,
}

impl ChartKind {
    /// Heading for the chart. Scoped to the unit's name when a single unit
    /// is selected.
    pub fn title(&self, selected: Option<&str>) -> String {
        match (self, selected) {
            (ChartKind::Hits, _) => "Hit Distribution".to_string(),
            (ChartKind::Wounds, Some(name)) => format!("Wounds: {}", name),
            (ChartKind::Wounds, None) => "Army Total Wounds".to_string(),
            (ChartKind::Damage, Some(name)) => format!("Damage: {}", name),
            (ChartKind::Damage, None) => "Army Total Damage".to_string(),
            (ChartKind::ToughnessScaling, Some(name)) => format!("Toughness Scaling: {}", name),
            (ChartKind::ToughnessScaling, None) => "Army Toughness Scaling".to_string(),
            (ChartKind::SaveScaling, Some(name)) => format!("Save Scaling: {}", name),
            (ChartKind::SaveScaling, None) => "Army Save Scaling".to_string(),
        }
    }

    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            ChartKind::Hits => Some(Quantity::Hits),
            ChartKind::Wounds => Some(Quantity::Wounds),
            ChartKind::Damage => Some(Quantity::Damage),
            ChartKind::ToughnessScaling | ChartKind::SaveScaling => None,
        }
    }

    /// (x axis, y axis) captions of the scaling charts.
    pub fn axis_labels(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ChartKind::ToughnessScaling => Some(("Toughness", "Avg Wounds")),
            ChartKind::SaveScaling => Some(("Target Save", "Avg Damage")),
            _ => None,
        }
    }

    /// Series points for the scaling charts; empty for distributions.
    pub fn scaling_points(&self, result: &CalcResult) -> Vec<DistPoint> {
        match self {
            ChartKind::ToughnessScaling => band::toughness_points(result.toughness_scaling()),
            ChartKind::SaveScaling => band::save_points(result.save_scaling()),
            _ => Vec::new(),
        }
    }
}

/// Everything a renderer needs for one distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionView {
    pub bars: BarChart,
    pub tiles: Vec<StatTile>,
    pub summary: Option<DistributionSummary>,
}

impl DistributionView {
    pub fn new(result: &CalcResult, quantity: Quantity) -> Self {
        let probabilities = result.distribution(quantity);
        Self {
            bars: BarChart::from_distribution(probabilities),
            tiles: stat_tiles(result, quantity),
            summary: DistributionSummary::from_probabilities(probabilities),
        }
    }

    /// Overlay parameters derived from the local summary.
    pub fn spread(&self) -> Option<Spread> {
        self.summary.as_ref().map(Spread::from_summary)
    }
}

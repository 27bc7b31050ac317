use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use warcalc::chart::{ChartKind, DistPoint, DistributionView};
use warcalc::protocol::RerollPolicy;
use warcalc::roster::{PointsProgress, PROGRESS_RING_RADIUS};
use warcalc::unit::{SustainedHits, Unit};

const BAR_WIDTH: usize = 40;
const GAUGE_WIDTH: usize = 20;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::Range<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_roster(units: &[Unit]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Pts"),
        Cell::new("M"),
        Cell::new("A"),
        Cell::new("BS/WS"),
        Cell::new("S"),
        Cell::new("AP"),
        Cell::new("D"),
        Cell::new("Modifiers").fg(Color::Cyan),
    ]);
    align_right(&mut table, 2..9);

    for unit in units {
        let s = &unit.stats;
        table.add_row(vec![
            Cell::new(unit.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&unit.name).add_attribute(Attribute::Bold),
            Cell::new(&unit.points),
            Cell::new(&s.models),
            Cell::new(&s.attacks),
            Cell::new(&s.bs_ws),
            Cell::new(&s.strength),
            Cell::new(&s.ap),
            Cell::new(&s.damage),
            Cell::new(modifiers(unit)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

fn modifiers(unit: &Unit) -> String {
    let t = &unit.toggles;
    let mut tags = Vec::new();
    if t.lethal_hits {
        tags.push("Lethal".to_string());
    }
    if t.devastating_wounds {
        tags.push("DevW".to_string());
    }
    if t.plus_one_to_hit {
        tags.push("+1 Hit".to_string());
    }
    if t.plus_one_to_wound {
        tags.push("+1 Wnd".to_string());
    }
    match &t.sustained_hits {
        SustainedHits::Off => {}
        SustainedHits::On => tags.push("Sus 1".to_string()),
        SustainedHits::Value(v) => tags.push(format!("Sus {}", v)),
    }
    if t.reroll_hits != RerollPolicy::None {
        tags.push(format!("RR Hit {}", t.reroll_hits));
    }
    if t.reroll_wounds != RerollPolicy::None {
        tags.push(format!("RR Wnd {}", t.reroll_wounds));
    }
    if let Some(n) = t.crit_hit {
        tags.push(format!("Crit Hit {}+", n));
    }
    if let Some(n) = t.crit_wound {
        tags.push(format!("Crit Wnd {}+", n));
    }
    tags.join(", ")
}

pub fn print_points(progress: &PointsProgress) {
    // Unrolled progress ring: the filled share is what the stroke offset leaves visible.
    let circumference = PointsProgress::circumference(PROGRESS_RING_RADIUS);
    let visible = 1.0 - progress.ring_offset(PROGRESS_RING_RADIUS) / circumference;
    let filled = ((visible * GAUGE_WIDTH as f64).round() as usize).min(GAUGE_WIDTH);

    let marker = if progress.over_limit { "⚠️  OVER LIMIT" } else { "" };
    println!(
        "Points: [{}{}] {} / {} ({}%) {}",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        progress.total,
        progress.limit,
        progress.percent(),
        marker
    );
}

pub fn print_distribution(title: &str, view: &DistributionView) {
    println!("\n=== {} ===", title);
    if view.bars.is_empty() {
        println!("(no data)");
        return;
    }

    let mut tiles = new_table();
    tiles.add_row(view.tiles.iter().map(|t| {
        Cell::new(&t.label)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Center)
    }));
    tiles.add_row(view.tiles.iter().map(|t| {
        let cell = Cell::new(&t.value).set_alignment(CellAlignment::Center);
        if t.long_value {
            cell
        } else {
            cell.fg(Color::Cyan)
        }
    }));
    tiles.add_row(
        view.tiles
            .iter()
            .map(|t| Cell::new(&t.sub).set_alignment(CellAlignment::Center)),
    );
    println!("{}", tiles);

    let label_width = view
        .bars
        .bars
        .iter()
        .map(|b| b.label.len())
        .max()
        .unwrap_or(0);
    for (i, bar) in view.bars.bars.iter().enumerate() {
        let label = if view.bars.show_label(i) { bar.label.as_str() } else { "" };
        let filled = (view.bars.height_ratio(i) * BAR_WIDTH as f64).round() as usize;
        println!(
            "{:>width$} | {:<bar_width$} {:5.1}%",
            label,
            "█".repeat(filled),
            bar.value * 100.0,
            width = label_width,
            bar_width = BAR_WIDTH
        );
    }

    if let Some(summary) = &view.summary {
        println!(
            "mean {:.2}  σ {:.2}  ±1σ {}",
            summary.mean,
            summary.std_dev,
            summary.range_std()
        );
    }
}

pub fn print_scaling(title: &str, kind: ChartKind, points: &[DistPoint]) {
    println!("\n=== {} ===", title);
    if points.is_empty() {
        println!("(no data)");
        return;
    }

    let (x_axis, y_axis) = kind.axis_labels().unwrap_or(("", "Avg"));
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(x_axis).add_attribute(Attribute::Bold),
        Cell::new(y_axis).fg(Color::Cyan),
        Cell::new("Lower 80%"),
        Cell::new("Upper 80%"),
    ]);
    align_right(&mut table, 1..4);

    for p in points {
        table.add_row(vec![
            Cell::new(&p.x_label).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", p.average)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", p.lower80)),
            Cell::new(format!("{:.2}", p.upper80)),
        ]);
    }
    println!("{}", table);
}

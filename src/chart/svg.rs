//! SVG rendering of chart geometry.
//!
//! The geometry builders know nothing about SVG; this is one renderer
//! among possible others (the CLI also draws bars as text).

use super::band::BandChart;
use super::curve::CurveSample;
use super::frame::{Frame, Point};
use std::fmt::Write;

/// `M x y L x y ...`, closed with `Z` when `close` is set. Empty input
/// gives an empty string.
pub fn path_data(points: &[Point], close: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{} {} {}", cmd, p.x, p.y);
    }
    if close && !points.is_empty() {
        d.push_str(" Z");
    }
    d
}

pub fn band_path(chart: &BandChart) -> String {
    path_data(&chart.band, true)
}

pub fn average_path(chart: &BandChart) -> String {
    path_data(&chart.average_line, false)
}

pub fn curve_path(samples: &[CurveSample]) -> String {
    let points: Vec<Point> = samples.iter().map(|s| s.point).collect();
    path_data(&points, false)
}

/// Axis captions of a band chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLabels<'a> {
    pub title: &'a str,
    pub x_axis: &'a str,
    pub y_axis: &'a str,
}

/// Standalone SVG document for a band chart.
pub fn band_document(chart: &BandChart, frame: &Frame, labels: &BandLabels) -> String {
    let left = frame.padding.left;
    let right = frame.width - frame.padding.right;
    let baseline = frame.baseline();

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        frame.width, frame.height
    );
    let _ = writeln!(out, "  <title>{}</title>", escape(labels.title));

    for line in &chart.gridlines {
        let _ = writeln!(
            out,
            r##"  <line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="#333" stroke-dasharray="4"/>"##,
            left,
            right,
            y = line.y
        );
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}" text-anchor="end">{}</text>"#,
            left - 10.0,
            line.y,
            line.label
        );
    }

    let _ = writeln!(
        out,
        r##"  <path d="{}" fill="#c0392b" fill-opacity="0.25" stroke="none"/>"##,
        band_path(chart)
    );
    let _ = writeln!(
        out,
        r##"  <path d="{}" fill="none" stroke="#c0392b" stroke-width="3"/>"##,
        average_path(chart)
    );

    for (tick, avg) in chart.ticks.iter().zip(&chart.average_line) {
        let _ = writeln!(out, r#"  <circle cx="{}" cy="{}" r="5"/>"#, avg.x, avg.y);
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}" text-anchor="middle">{}</text>"#,
            tick.x,
            baseline + 25.0,
            escape(&tick.label)
        );
    }

    let _ = writeln!(
        out,
        r#"  <text x="{}" y="{}" text-anchor="middle">{}</text>"#,
        left + frame.usable_width() / 2.0,
        frame.height - 20.0,
        escape(labels.x_axis)
    );
    let _ = writeln!(
        out,
        r#"  <text x="20" y="{}" text-anchor="middle" transform="rotate(-90 20 {})">{}</text>"#,
        frame.padding.top + frame.usable_height() / 2.0,
        frame.padding.top + frame.usable_height() / 2.0,
        escape(labels.y_axis)
    );
    out.push_str("</svg>\n");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

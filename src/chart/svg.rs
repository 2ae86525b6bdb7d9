use std::fmt::{self, Write as _};

use super::ChartData;
use super::axis::{format_magnitude, nice_ticks};
use crate::usage::CounterKind;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const PLOT_LEFT: f64 = 80.0;
const PLOT_RIGHT: f64 = 980.0;
const PLOT_TOP: f64 = 80.0;
const PLOT_BOTTOM: f64 = 420.0;
/// Share of each date slot covered by its bar.
const BAR_FILL: f64 = 0.8;

const TITLE_COLOR: &str = "#c9d1d9";
const TICK_COLOR: &str = "#8b949e";
const AXIS_COLOR: &str = "#30363d";
const FONT: &str = "-apple-system, 'Segoe UI', Helvetica, Arial, sans-serif";

/// Vertical mapping from counter values to plot coordinates.
struct Scale {
    top: u64,
}

impl Scale {
    #[allow(clippy::cast_precision_loss)]
    fn y(&self, value: u64) -> f64 {
        let frac = value as f64 / self.top as f64;
        (PLOT_TOP - PLOT_BOTTOM).mul_add(frac, PLOT_BOTTOM)
    }
}

/// Render `data` as a standalone SVG document.
///
/// There is no background fill, so the chart sits on whatever page embeds it.
pub fn render_svg(data: &ChartData) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, data);
    out
}

fn write_document(out: &mut String, data: &ChartData) -> fmt::Result {
    let ticks = nice_ticks(data.max_total());
    let scale = Scale {
        top: ticks.last().copied().unwrap_or(1).max(1),
    };

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="{FONT}">"#
    )?;
    writeln!(
        out,
        r#"  <text x="{:.1}" y="30" text-anchor="middle" font-size="16" fill="{TITLE_COLOR}">Daily Token Usage (Last {} Days)</text>"#,
        WIDTH / 2.0,
        data.window
    )?;
    write_legend(out)?;
    write_y_axis(out, &ticks, &scale)?;
    write_bars(out, data, &scale)?;
    write_x_axis(out, data)?;
    writeln!(out, "</svg>")
}

fn write_legend(out: &mut String) -> fmt::Result {
    writeln!(out, r#"  <g class="legend" font-size="12">"#)?;
    let mut x = PLOT_LEFT;
    for kind in CounterKind::STACK_ORDER {
        writeln!(
            out,
            r#"    <rect x="{x:.1}" y="48" width="12" height="12" rx="2" fill="{}" fill-opacity="0.9"/>"#,
            kind.color()
        )?;
        writeln!(
            out,
            r#"    <text x="{:.1}" y="58" fill="{TITLE_COLOR}">{}</text>"#,
            x + 18.0,
            kind.label()
        )?;
        x += 110.0;
    }
    writeln!(out, "  </g>")
}

fn write_y_axis(out: &mut String, ticks: &[u64], scale: &Scale) -> fmt::Result {
    writeln!(out, r#"  <g class="y-axis" font-size="11">"#)?;
    for &tick in ticks {
        let y = scale.y(tick);
        writeln!(
            out,
            r#"    <line x1="{PLOT_LEFT}" y1="{y:.1}" x2="{PLOT_RIGHT}" y2="{y:.1}" stroke="{AXIS_COLOR}" stroke-opacity="0.3" stroke-dasharray="4 3"/>"#
        )?;
        writeln!(
            out,
            r#"    <text x="{:.1}" y="{:.1}" text-anchor="end" fill="{TICK_COLOR}">{}</text>"#,
            PLOT_LEFT - 8.0,
            y + 4.0,
            format_magnitude(tick)
        )?;
    }
    writeln!(out, "  </g>")
}

#[allow(clippy::cast_precision_loss)]
fn slot_width(data: &ChartData) -> f64 {
    (PLOT_RIGHT - PLOT_LEFT) / data.dates.len().max(1) as f64
}

#[allow(clippy::cast_precision_loss)]
fn slot_center(data: &ChartData, index: usize) -> f64 {
    slot_width(data).mul_add(index as f64 + 0.5, PLOT_LEFT)
}

fn write_bars(out: &mut String, data: &ChartData, scale: &Scale) -> fmt::Result {
    let bar_width = slot_width(data) * BAR_FILL;
    for (series, baseline) in data.series.iter().zip(data.baselines()) {
        writeln!(
            out,
            r#"  <g class="series" fill="{}" fill-opacity="0.9">"#,
            series.kind.color()
        )?;
        for (i, (&value, &base)) in series.values.iter().zip(&baseline).enumerate() {
            let y_top = scale.y(base.saturating_add(value));
            let height = scale.y(base) - y_top;
            let date = data.dates[i].format("%m-%d");
            writeln!(
                out,
                r#"    <rect x="{:.1}" y="{y_top:.1}" width="{bar_width:.1}" height="{height:.1}"><title>{date} {}: {value}</title></rect>"#,
                slot_center(data, i) - bar_width / 2.0,
                series.kind.label()
            )?;
        }
        writeln!(out, "  </g>")?;
    }
    Ok(())
}

fn write_x_axis(out: &mut String, data: &ChartData) -> fmt::Result {
    writeln!(
        out,
        r#"  <line x1="{PLOT_LEFT}" y1="{PLOT_BOTTOM}" x2="{PLOT_RIGHT}" y2="{PLOT_BOTTOM}" stroke="{AXIS_COLOR}"/>"#
    )?;
    writeln!(out, r#"  <g class="x-axis" font-size="11">"#)?;
    let label_y = PLOT_BOTTOM + 16.0;
    for (i, date) in data.dates.iter().enumerate() {
        let x = slot_center(data, i);
        writeln!(
            out,
            r#"    <text x="{x:.1}" y="{label_y:.1}" text-anchor="end" transform="rotate(-45 {x:.1} {label_y:.1})" fill="{TICK_COLOR}">{}</text>"#,
            date.format("%m-%d")
        )?;
    }
    writeln!(out, "  </g>")
}

// Rank vs count charts as standalone SVG
use std::fmt::Write as _;

use crate::config::ChartConfig;
use crate::types::RankedEntry;

const MARGIN_LEFT: f32 = 64.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 44.0;
const MARGIN_BOTTOM: f32 = 52.0;
const SERIES_COLOR: &str = "#636efa";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Line,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "Word Frequency Scatter Plot",
            ChartKind::Line => "Word Frequency Line Chart",
        }
    }
}

// Linear map from data space to pixel space
struct Axis {
    min: f64,
    max: f64,
    px_start: f32,
    px_end: f32,
}

impl Axis {
    fn project(&self, v: f64) -> f32 {
        let t = if self.max > self.min { (v - self.min) / (self.max - self.min) } else { 0.5 };
        self.px_start + (self.px_end - self.px_start) * t as f32
    }
}

/// Step from {1, 2, 5} x 10^k giving roughly `target` intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    if span <= 0.0 || target == 0 {
        return 1.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    // Counts and ranks are integers
    step.max(1.0)
}

fn ticks(max: f64, target: usize) -> Vec<f64> {
    let step = nice_step(max, target);
    let mut ticks = Vec::new();
    let mut v = 0.0;
    while v <= max + step * 1e-9 {
        ticks.push(v);
        v += step;
    }
    ticks
}

pub fn render_chart(ranked: &[RankedEntry], kind: ChartKind, config: &ChartConfig) -> String {
    let (w, h) = (config.width as f32, config.height as f32);
    let max_rank = ranked.len().max(1) as f64;
    let max_count = ranked.iter().map(|e| e.count).max().unwrap_or(1) as f64;

    let x_ticks = ticks(max_rank, 8);
    let y_ticks = ticks(max_count, 6);
    let x = Axis {
        min: 0.0,
        max: x_ticks.last().copied().unwrap_or(max_rank).max(max_rank),
        px_start: MARGIN_LEFT,
        px_end: w - MARGIN_RIGHT,
    };
    let y = Axis {
        min: 0.0,
        max: y_ticks.last().copied().unwrap_or(max_count).max(max_count),
        px_start: h - MARGIN_BOTTOM,
        px_end: MARGIN_TOP,
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet" font-family="sans-serif" font-size="12">"#
    );
    let _ = write!(svg, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="24" font-size="16" font-weight="bold">{}</text>"#,
        MARGIN_LEFT,
        kind.title()
    );

    // Grid and tick labels
    for t in &y_ticks {
        let py = y.project(*t);
        let _ = write!(
            svg,
            r##"<line x1="{:.1}" y1="{py:.1}" x2="{:.1}" y2="{py:.1}" stroke="#e5ecf6"/><text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"##,
            MARGIN_LEFT,
            w - MARGIN_RIGHT,
            MARGIN_LEFT - 8.0,
            py + 4.0,
            t
        );
    }
    for t in &x_ticks {
        let px = x.project(*t);
        let _ = write!(
            svg,
            r##"<line x1="{px:.1}" y1="{:.1}" x2="{px:.1}" y2="{:.1}" stroke="#e5ecf6"/><text x="{px:.1}" y="{:.1}" text-anchor="middle">{}</text>"##,
            MARGIN_TOP,
            h - MARGIN_BOTTOM,
            h - MARGIN_BOTTOM + 18.0,
            t
        );
    }

    // Axes and their titles
    let _ = write!(
        svg,
        r##"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#444"/><line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="#444"/>"##,
        l = MARGIN_LEFT,
        r = w - MARGIN_RIGHT,
        t = MARGIN_TOP,
        b = h - MARGIN_BOTTOM
    );
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">Rank</text><text transform="translate(16 {:.1}) rotate(-90)" text-anchor="middle">Count</text>"#,
        (MARGIN_LEFT + w - MARGIN_RIGHT) / 2.0,
        h - 12.0,
        (MARGIN_TOP + h - MARGIN_BOTTOM) / 2.0
    );

    let points: Vec<(f32, f32)> = ranked
        .iter()
        .map(|e| (x.project(e.rank as f64), y.project(e.count as f64)))
        .collect();

    if kind == ChartKind::Line && !points.is_empty() {
        let path: Vec<String> = points.iter().map(|(px, py)| format!("{:.1},{:.1}", px, py)).collect();
        let _ = write!(
            svg,
            r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            SERIES_COLOR,
            path.join(" ")
        );
    }

    // One hover target per entry; invisible on the line chart
    let (radius, opacity) = match kind {
        ChartKind::Scatter => (3.5, 0.8),
        ChartKind::Line => (3.0, 0.0),
    };
    for (entry, (px, py)) in ranked.iter().zip(&points) {
        let _ = write!(
            svg,
            r#"<circle class="pt" cx="{:.1}" cy="{:.1}" r="{}" fill="{}" fill-opacity="{}"><title>{}&#10;Rank: {}&#10;Count: {}</title></circle>"#,
            px,
            py,
            radius,
            SERIES_COLOR,
            opacity,
            html_escape::encode_text(&entry.word),
            entry.rank,
            entry.count
        );
    }

    svg.push_str("</svg>");
    svg
}

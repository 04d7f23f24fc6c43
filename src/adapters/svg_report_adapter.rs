//! SVG chart report: close price line with buy/sell markers.

use std::fs;
use std::path::Path;

use chrono::Datelike;

use crate::domain::error::StartraderError;
use crate::domain::report::ReportData;
use crate::domain::signal::Signal;
use crate::ports::report_port::ReportPort;

const CHART_WIDTH: f64 = 1000.0;
const CHART_HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARKER_SIZE: f64 = 6.0;

const LINE_COLOR: &str = "#2563eb";
const BUY_COLOR: &str = "#16a34a";
const SELL_COLOR: &str = "#dc2626";

pub struct SvgChartAdapter;

impl SvgChartAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for SvgChartAdapter {
    fn write(&self, report: &ReportData, output_path: &Path) -> Result<(), StartraderError> {
        let svg = render_chart(report);
        fs::write(output_path, svg).map_err(|e| StartraderError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn render_chart(report: &ReportData) -> String {
    let series = &report.result.series;
    let title = escape(&report.title());

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"22\" text-anchor=\"middle\" font-size=\"16\" fill=\"#111\">{}</text>\n",
        CHART_WIDTH / 2.0,
        title
    ));

    if series.is_empty() {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\" fill=\"#666\">No price data</text>\n",
            CHART_WIDTH / 2.0,
            CHART_HEIGHT / 2.0
        ));
        svg.push_str("</svg>");
        return svg;
    }

    let min_close = series.iter().map(|d| d.close).fold(f64::INFINITY, f64::min);
    let max_close = series
        .iter()
        .map(|d| d.close)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = (max_close - min_close).max(f64::EPSILON);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let x_scale =
        |i: usize| -> f64 { MARGIN_LEFT + (i as f64 / (series.len() - 1).max(1) as f64) * plot_width };
    let y_scale =
        |v: f64| -> f64 { MARGIN_TOP + plot_height - ((v - min_close) / range) * plot_height };

    // axes
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));

    for value in [max_close, (max_close + min_close) / 2.0, min_close] {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{:.2}</text>\n",
            MARGIN_LEFT - 5.0,
            y_scale(value) + 3.0,
            value
        ));
    }

    // one tick per calendar month, at its first trading day
    let mut last_month = None;
    for (i, day) in series.iter().enumerate() {
        let month = (day.date.year(), day.date.month());
        if last_month == Some(month) {
            continue;
        }
        last_month = Some(month);
        let x = x_scale(i);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{}\" x2=\"{:.1}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
            x,
            CHART_HEIGHT - MARGIN_BOTTOM,
            x,
            CHART_HEIGHT - MARGIN_BOTTOM + 5.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\" transform=\"rotate(-30 {:.1} {})\">{}</text>\n",
            x,
            CHART_HEIGHT - MARGIN_BOTTOM + 18.0,
            x,
            CHART_HEIGHT - MARGIN_BOTTOM + 18.0,
            day.date.format("%Y-%m")
        ));
    }

    let mut path_data = String::new();
    for (i, day) in series.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        path_data.push_str(&format!("{} {:.1} {:.1}", cmd, x_scale(i), y_scale(day.close)));
    }
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
        path_data, LINE_COLOR
    ));

    for (i, day) in series.iter().enumerate() {
        let (x, y) = (x_scale(i), y_scale(day.close));
        match day.signal {
            Signal::Buy => svg.push_str(&triangle(x, y, true)),
            Signal::Sell => svg.push_str(&triangle(x, y, false)),
            Signal::Hold => {}
        }
    }

    svg.push_str(&legend());
    svg.push_str("</svg>");
    svg
}

fn triangle(x: f64, y: f64, up: bool) -> String {
    let s = MARKER_SIZE;
    let (tip, base, color, class) = if up {
        (y - s, y + s, BUY_COLOR, "buy")
    } else {
        (y + s, y - s, SELL_COLOR, "sell")
    };
    format!(
        "  <polygon class=\"{}\" points=\"{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\" fill=\"{}\"/>\n",
        class,
        x,
        tip,
        x - s,
        base,
        x + s,
        base,
        color
    )
}

fn legend() -> String {
    let x = CHART_WIDTH - MARGIN_RIGHT - 110.0;
    let y = MARGIN_TOP + 10.0;
    let mut out = String::new();
    out.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
        x,
        y,
        x + 20.0,
        y,
        LINE_COLOR
    ));
    out.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"11\" fill=\"#333\">Close Price</text>\n",
        x + 26.0,
        y + 4.0
    ));
    for (row, (label, up, color)) in [("Buy", true, BUY_COLOR), ("Sell", false, SELL_COLOR)]
        .into_iter()
        .enumerate()
    {
        let ly = y + 16.0 * (row + 1) as f64;
        let (tip, base) = if up { (ly - 5.0, ly + 5.0) } else { (ly + 5.0, ly - 5.0) };
        out.push_str(&format!(
            "  <polygon points=\"{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\" fill=\"{}\"/>\n",
            x + 10.0,
            tip,
            x + 5.0,
            base,
            x + 15.0,
            base,
            color
        ));
        out.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"11\" fill=\"#333\">{}</text>\n",
            x + 26.0,
            ly + 4.0,
            label
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{AnnotatedDay, BacktestResult};
    use crate::domain::modifier::Modifier;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report(series: Vec<AnnotatedDay>) -> ReportData {
        ReportData {
            symbol: "600036.SH".into(),
            birth_year: Some(1990),
            modifier: Modifier::Status,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 3, 31),
            result: BacktestResult {
                starting_cash: 10_000.0,
                final_cash: 10_512.0,
                roi: 5.12,
                series,
                fills: Vec::new(),
            },
        }
    }

    fn sample_series() -> Vec<AnnotatedDay> {
        vec![
            AnnotatedDay {
                date: date(2024, 1, 2),
                close: 32.4,
                signal: Signal::Buy,
            },
            AnnotatedDay {
                date: date(2024, 1, 3),
                close: 32.8,
                signal: Signal::Hold,
            },
            AnnotatedDay {
                date: date(2024, 2, 3),
                close: 33.1,
                signal: Signal::Sell,
            },
            AnnotatedDay {
                date: date(2024, 3, 4),
                close: 31.9,
                signal: Signal::Hold,
            },
        ]
    }

    #[test]
    fn chart_has_title_with_roi() {
        let svg = render_chart(&report(sample_series()));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("600036.SH Star Strategy (BirthYear=1990, ROI: 5.12%)"));
    }

    #[test]
    fn chart_marks_buys_and_sells() {
        let svg = render_chart(&report(sample_series()));
        assert_eq!(svg.matches("class=\"buy\"").count(), 1);
        assert_eq!(svg.matches("class=\"sell\"").count(), 1);
        assert!(svg.contains("<path d=\"M "));
    }

    #[test]
    fn chart_has_monthly_ticks() {
        let svg = render_chart(&report(sample_series()));
        assert!(svg.contains(">2024-01<"));
        assert!(svg.contains(">2024-02<"));
        assert!(svg.contains(">2024-03<"));
        assert_eq!(svg.matches(">2024-01<").count(), 1);
    }

    #[test]
    fn chart_handles_flat_prices_and_single_day() {
        let series = vec![AnnotatedDay {
            date: date(2024, 1, 2),
            close: 10.0,
            signal: Signal::Buy,
        }];
        let svg = render_chart(&report(series));
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("class=\"buy\"").count(), 1);
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let svg = render_chart(&report(Vec::new()));
        assert!(svg.contains("No price data"));
    }

    #[test]
    fn write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        SvgChartAdapter::new()
            .write(&report(sample_series()), &path)
            .unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Close Price"));
    }

    #[test]
    fn write_to_missing_dir_is_report_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("chart.svg");
        let err = SvgChartAdapter::new()
            .write(&report(sample_series()), &path)
            .unwrap_err();
        assert!(matches!(err, StartraderError::Report { .. }));
    }
}

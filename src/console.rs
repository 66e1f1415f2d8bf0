//! Human-facing console output. Logs go through `tracing`; the tables here
//! are the results a reader of the run actually asked for.

use analytics::CentralTendency;
use analyzer::{AnomalyReport, CalendarReport, SeriesOverview, SummaryComparison};
use comfy_table::{Table, presets::UTF8_FULL};
use generator::GeneratedSeries;
use std::path::Path;

fn table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

fn amount(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.2}"))
}

pub fn print_generation(generated: &GeneratedSeries, path: &Path) {
    let mut t = table();
    t.set_header(vec!["", "days", "dates"]);
    t.add_row(vec![
        "calendar".to_string(),
        generated.calendar_days.to_string(),
        String::new(),
    ]);
    t.add_row(vec![
        "written".to_string(),
        generated.series.len().to_string(),
        path.display().to_string(),
    ]);
    for (label, dates) in [
        ("removed", &generated.removed),
        ("spikes", &generated.spikes),
        ("drops", &generated.drops),
    ] {
        let listed: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
        t.add_row(vec![label.to_string(), dates.len().to_string(), listed.join(", ")]);
    }
    println!("{t}");
}

pub fn print_overview(overview: &SeriesOverview) {
    println!(
        "Rows: {}  |  Range: {} to {}",
        overview.rows, overview.start, overview.end
    );

    let mut preview = table();
    preview.set_header(vec!["date", "revenue"]);
    for record in &overview.preview {
        preview.add_row(vec![record.date.to_string(), amount(record.revenue)]);
    }
    println!("{preview}");

    let mut stats = table();
    stats.set_header(vec!["statistic", "revenue"]);
    for (label, value) in overview.stats.rows() {
        stats.add_row(vec![label.to_string(), amount(value)]);
    }
    println!("{stats}");
}

pub fn print_calendar(calendar: &CalendarReport) {
    let mut t = table();
    t.set_header(vec!["expected days", "observed days", "missing days"]);
    t.add_row(vec![
        calendar.expected_days.to_string(),
        calendar.observed_days.to_string(),
        calendar.missing_days().to_string(),
    ]);
    println!("{t}");
}

pub fn print_anomalies(report: &AnomalyReport) {
    let b = &report.bounds;
    println!(
        "IQR bounds: lower = {:.2}, upper = {:.2} (Q1 = {:.2}, Q3 = {:.2}, k = {})",
        b.lower, b.upper, b.q1, b.q3, b.multiplier
    );
    println!(
        "Anomalies detected: {} ({} above, {} below)",
        report.count(),
        report.above_upper(),
        report.below_lower()
    );

    if report.count() > 0 {
        let mut t = table();
        t.set_header(vec!["date", "revenue"]);
        for record in &report.anomalies {
            t.add_row(vec![record.date.to_string(), amount(record.revenue)]);
        }
        println!("{t}");
    }
}

pub fn print_comparison(comparison: &SummaryComparison) {
    let row = |label: &str, c: &CentralTendency| {
        vec![
            label.to_string(),
            c.count.to_string(),
            amount(c.mean),
            amount(c.median),
        ]
    };

    let mut t = table();
    t.set_header(vec!["series", "values", "mean", "median"]);
    t.add_row(row("raw", &comparison.raw));
    t.add_row(row("clean", &comparison.clean));
    println!("{t}");
}

//! Console rendering for the simulator and analyzer
//!
//! Pure string builders; the binaries decide where the text goes.

use crate::analysis::FieldAverages;
use crate::driver::TickReport;
use crate::feed::{FeedError, FeedWindow};

/// Text shown when a field has no data
pub const NO_DATA: &str = "no data";

/// Simulator start banner
pub fn simulator_banner() -> String {
    [
        "",
        "╔══════════════════════════════════════════════════════════╗",
        "║                 Car Telemetry Simulator                  ║",
        "╚══════════════════════════════════════════════════════════╝",
        "Starting vehicle telemetry (4 fields: speed, rpm, fuel, temp) ...",
        "",
    ]
    .join("\n")
}

/// Header of the per-tick table
pub fn trip_table_header() -> String {
    [
        "┌─────────┬──────────┬──────────┬──────────┬──────────┐",
        "│  TIME s │  SPEED   │   RPM    │   FUEL   │   TEMP   │",
        "│         │ (km/h)   │          │    (%)   │   (°C)   │",
        "├─────────┼──────────┼──────────┼──────────┼──────────┤",
    ]
    .join("\n")
}

/// One table row for a tick
pub fn trip_row(report: &TickReport) -> String {
    let r = &report.reading;
    format!(
        "│ {:7.0} │ {:8.0} │ {:8.0} │ {:8.1} │ {:8.0} │",
        report.elapsed.as_secs_f64(),
        r.speed,
        r.rpm,
        r.fuel,
        r.temp
    )
}

/// Bottom border of the per-tick table
pub fn trip_table_footer() -> &'static str {
    "└─────────┴──────────┴──────────┴──────────┴──────────┘"
}

/// Short form of a channel error: the HTTP status when there is one
pub fn describe_feed_error(error: &FeedError) -> String {
    match error.status() {
        Some(code) => format!("HTTP {}", code),
        None => error.to_string(),
    }
}

/// Line printed in the trip table when a reading could not be sent
pub fn publish_warning(tick: u32, error: &FeedError) -> String {
    format!(
        "[Warning] Reading {} was not sent: {}",
        tick,
        describe_feed_error(error)
    )
}

/// Analyzer start banner
pub fn analyzer_banner() -> String {
    [
        "╔══════════════════════════════════════════════════════════════════════╗",
        "║                       Car Telemetry Analysis                         ║",
        "╚══════════════════════════════════════════════════════════════════════╝",
        "",
    ]
    .join("\n")
}

/// Analyzer window menu, without the trailing prompt
pub fn analyzer_menu() -> String {
    [
        "Choose what to analyze:",
        "  [1]  Last 24 hours",
        "  [2]  Last 100 data points",
    ]
    .join("\n")
}

/// Map a menu answer to a feed window
pub fn parse_menu_choice(input: &str) -> Option<FeedWindow> {
    match input.trim() {
        "1" => Some(FeedWindow::LastHours(24)),
        "2" => Some(FeedWindow::LastResults(100)),
        _ => None,
    }
}

/// One labelled line of the averages report
pub fn average_row(label: &str, value: Option<f64>, unit: &str, decimals: usize) -> String {
    let formatted = match value {
        Some(v) => format!("{:.*} {}", decimals, v, unit).trim().to_string(),
        None => NO_DATA.to_string(),
    };
    format!("│  {:<22}: {:<44}│", label, formatted)
}

/// Boxed report of all four averages
pub fn averages_report(averages: &FieldAverages) -> String {
    [
        "┌──────────────────────────── TELEMETRY ANALYSIS ──────────────────────┐".to_string(),
        "│  Overview of averages                                                │".to_string(),
        "├──────────────────────────────────────────────────────────────────────┤".to_string(),
        average_row("Average speed", averages.speed, "km/h", 1),
        average_row("Average RPM", averages.rpm, "", 0),
        average_row("Average fuel", averages.fuel, "%", 1),
        average_row("Average temp", averages.temp, "°C", 1),
        "└──────────────────────────────────────────────────────────────────────┘".to_string(),
    ]
    .join("\n")
}

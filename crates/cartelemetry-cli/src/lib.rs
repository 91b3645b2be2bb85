//! Shared pieces of the `car-simulator` and `telemetry-analyzer` binaries.

use cartelemetry_core::analysis::{aggregate, FieldAverages};
use cartelemetry_core::config::{AppSettings, ChannelSettings, ConfigError};
use cartelemetry_core::console;
use cartelemetry_core::driver::{TickReport, TripObserver, TripPlan, TripSummary};
use cartelemetry_core::feed::{FeedError, FeedReader, FeedWindow};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Simulate a trip and publish every reading to the channel
#[derive(Debug, Parser)]
#[command(name = "car-simulator", version)]
pub struct SimulatorArgs {
    /// Settings file (defaults to ./appsettings.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible trip
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Fetch published readings and print their averages
#[derive(Debug, Parser)]
#[command(name = "telemetry-analyzer", version)]
pub struct AnalyzerArgs {
    /// Settings file (defaults to ./appsettings.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Analyze everything published in the last N hours
    #[arg(long, value_name = "N", conflicts_with = "last_results")]
    pub last_hours: Option<u32>,

    /// Analyze the N most recent data points
    #[arg(long, value_name = "N")]
    pub last_results: Option<u32>,
}

impl AnalyzerArgs {
    /// Window picked on the command line, if any
    pub fn window(&self) -> Option<FeedWindow> {
        match (self.last_hours, self.last_results) {
            (Some(hours), _) => Some(FeedWindow::LastHours(hours)),
            (None, Some(results)) => Some(FeedWindow::LastResults(results)),
            (None, None) => None,
        }
    }
}

/// Install the stderr log subscriber (`RUST_LOG` overrides the `info` default)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Locate and load the channel settings
pub fn load_settings(explicit: Option<&Path>) -> Result<ChannelSettings, ConfigError> {
    let path = AppSettings::locate(explicit)?;
    info!(path = %path.display(), "loading settings");
    Ok(AppSettings::load(&path)?.thing_speak)
}

/// Renders trip progress as a console table
pub struct ConsoleObserver<W: Write> {
    out: W,
    printed_header: bool,
}

impl<W: Write> ConsoleObserver<W> {
    /// Render to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed_header: false,
        }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            debug!(error = %e, "console write failed");
        }
    }
}

impl<W: Write> TripObserver for ConsoleObserver<W> {
    fn trip_started(&mut self, _plan: &TripPlan) {
        self.emit(&console::simulator_banner());
    }

    fn tick(&mut self, report: &TickReport) {
        if !self.printed_header {
            self.emit(&console::trip_table_header());
            self.printed_header = true;
        }
        self.emit(&console::trip_row(report));
    }

    fn publish_failed(&mut self, tick: u32, error: &FeedError) {
        self.emit(&console::publish_warning(tick, error));
    }

    fn trip_finished(&mut self, summary: &TripSummary) {
        if self.printed_header {
            self.emit(console::trip_table_footer());
        }
        self.emit("");
        self.emit(&format!(
            "Trip complete: {} readings sent, {} failed. Transmission ended.",
            summary.published, summary.failed
        ));
    }
}

/// Show the window menu and read one answer
///
/// Returns `None` for an answer that is not on the menu.
pub fn prompt_window<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<FeedWindow>> {
    writeln!(out, "{}", console::analyzer_menu())?;
    write!(out, "Your choice (1/2): ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(console::parse_menu_choice(&answer))
}

/// How an analysis run ended
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Averages were computed and printed
    Report(FieldAverages),
    /// The window held no records
    NoData,
    /// The channel could not be read
    FetchFailed,
}

/// Fetch `window` from `reader` and print the averages to `out`
///
/// Fetch failures are logged and reported, never returned: the only errors
/// are failures writing to `out`.
pub async fn run_analysis<R: FeedReader, W: Write>(
    reader: &R,
    window: FeedWindow,
    out: &mut W,
) -> io::Result<AnalysisOutcome> {
    let samples = match reader.fetch(window).await {
        Ok(samples) => samples,
        Err(e) => {
            error!(error = %e, ?window, "could not fetch channel data");
            writeln!(
                out,
                "[Error] Could not fetch data: {}",
                console::describe_feed_error(&e)
            )?;
            return Ok(AnalysisOutcome::FetchFailed);
        }
    };

    if samples.is_empty() {
        info!(?window, "no data points in window");
        writeln!(out, "No data points found for the selected period.")?;
        return Ok(AnalysisOutcome::NoData);
    }

    let averages = aggregate(&samples);
    info!(samples = samples.len(), counts = ?averages.counts, "computed averages");
    writeln!(out)?;
    writeln!(out, "{}", console::averages_report(&averages))?;
    writeln!(out)?;
    Ok(AnalysisOutcome::Report(averages))
}

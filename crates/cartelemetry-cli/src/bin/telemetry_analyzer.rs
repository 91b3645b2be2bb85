//! Reads published telemetry back from the channel and prints averages.

use anyhow::Context;
use cartelemetry_cli::{init_tracing, load_settings, prompt_window, run_analysis, AnalyzerArgs};
use cartelemetry_core::console;
use cartelemetry_core::feed::ThingSpeakClient;
use clap::Parser;
use std::io::{self, Write};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = AnalyzerArgs::parse();

    let settings = load_settings(args.config.as_deref())?;
    settings
        .validate_for_analysis()
        .context("cannot analyze the channel")?;

    let mut out = io::stdout();
    writeln!(out, "{}", console::analyzer_banner())?;

    let window = match args.window() {
        Some(window) => Some(window),
        None => prompt_window(&mut io::stdin().lock(), &mut out)?,
    };
    let Some(window) = window else {
        warn!("invalid menu choice");
        writeln!(out, "Invalid choice. Exiting.")?;
        return Ok(());
    };

    let client = ThingSpeakClient::new(&settings).context("cannot set up the channel client")?;
    run_analysis(&client, window, &mut out).await?;

    Ok(())
}

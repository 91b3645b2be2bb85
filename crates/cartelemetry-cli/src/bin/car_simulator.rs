//! Simulates one trip and publishes every tick to the telemetry channel.

use anyhow::Context;
use cartelemetry_cli::{init_tracing, load_settings, ConsoleObserver, SimulatorArgs};
use cartelemetry_core::driver::TickDriver;
use cartelemetry_core::feed::ThingSpeakClient;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = SimulatorArgs::parse();

    let settings = load_settings(args.config.as_deref())?;
    settings
        .validate_for_simulation()
        .context("cannot start the trip")?;

    let client = ThingSpeakClient::new(&settings).context("cannot set up the channel client")?;
    let noise = match args.seed {
        Some(seed) => {
            info!(seed, "using seeded vehicle noise");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut observer = ConsoleObserver::new(io::stdout());
    let mut driver = TickDriver::new(settings.trip_plan(), client, noise);
    driver.run(&mut observer).await;

    Ok(())
}

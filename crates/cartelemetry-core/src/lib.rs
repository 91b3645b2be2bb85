//! # CarTelemetry Core Library
//!
//! Core functionality for the CarTelemetry simulator and analyzer.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - A vehicle model that evolves speed, RPM, fuel and engine temperature
//! - A fixed-interval trip driver that publishes every reading
//! - A ThingSpeak-style channel client for publishing and reading feeds
//! - Per-field averaging of retrieved feed samples
//! - Settings loading and console rendering
//!
//! ## Example
//!
//! ```rust,ignore
//! use cartelemetry_core::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let settings = AppSettings::load("appsettings.json")?.thing_speak;
//! settings.validate_for_simulation()?;
//!
//! let client = ThingSpeakClient::new(&settings)?;
//! let mut driver = TickDriver::new(settings.trip_plan(), client, StdRng::from_entropy());
//! let summary = driver.run(&mut observer).await;
//! println!("{} ticks, {} published", summary.ticks, summary.published);
//! ```

pub mod analysis;
pub mod config;
pub mod console;
pub mod driver;
pub mod feed;
pub mod vehicle;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{aggregate, FieldAverages};
    pub use crate::config::{AppSettings, ChannelSettings, ConfigError};
    pub use crate::driver::{TickDriver, TickReport, TripObserver, TripPlan, TripSummary};
    pub use crate::feed::{
        FeedError, FeedReader, FeedSample, FeedWindow, FieldMap, Publisher, ThingSpeakClient,
    };
    pub use crate::vehicle::{NoiseSource, Phase, Reading, VehicleState};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

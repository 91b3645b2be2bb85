//! Telemetry Channel Transport
//!
//! Publishes readings to, and reads history back from, a ThingSpeak-style
//! time-series channel over HTTP.
//!
//! ## Usage
//!
//! ```ignore
//! let mut client = ThingSpeakClient::new(&settings.thing_speak)?;
//! client.publish(&reading).await?;
//! let samples = client.fetch(FeedWindow::LastResults(100)).await?;
//! ```

mod client;
mod error;
mod sample;

pub use client::{FeedReader, FeedWindow, Publisher, ThingSpeakClient};
pub use error::FeedError;
pub use sample::{decode_feeds, parse_field_value, FeedSample, FieldMap};

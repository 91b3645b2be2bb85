//! ThingSpeak channel client
//!
//! Pushes readings with the `update` endpoint and pulls history from the
//! channel's `feeds.json`.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Url;
use std::future::Future;
use tracing::debug;

use super::sample::{decode_feeds, FeedSample, FieldMap};
use super::FeedError;
use crate::config::ChannelSettings;
use crate::vehicle::Reading;

/// Timestamp layout the feeds endpoint expects for `start`/`end`
const FEED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which slice of channel history to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedWindow {
    /// Everything published in the last N hours
    LastHours(u32),
    /// The N most recent records
    LastResults(u32),
}

/// Push side of the channel
pub trait Publisher {
    /// Publish one reading. The response body is not inspected.
    fn publish(
        &mut self,
        reading: &Reading,
    ) -> impl Future<Output = Result<(), FeedError>> + Send;
}

/// Pull side of the channel
pub trait FeedReader {
    /// Fetch the records inside `window`
    fn fetch(
        &self,
        window: FeedWindow,
    ) -> impl Future<Output = Result<Vec<FeedSample>, FeedError>> + Send;
}

/// HTTP client for a ThingSpeak-compatible channel
pub struct ThingSpeakClient {
    client: reqwest::Client,
    base_url: Url,
    channel_id: u64,
    write_key: String,
    read_key: Option<String>,
    fields: FieldMap,
}

impl ThingSpeakClient {
    /// Create a client from channel settings
    pub fn new(settings: &ChannelSettings) -> Result<Self, FeedError> {
        let mut base_url = Url::parse(&settings.base_url)
            .map_err(|e| FeedError::InvalidUrl(format!("{}: {}", settings.base_url, e)))?;
        // Url::join drops the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("CarTelemetry/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.request_timeout())
            .build()?;

        let read_key = Some(settings.read_api_key.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self {
            client,
            base_url,
            channel_id: settings.channel_id,
            write_key: settings.write_api_key.trim().to_string(),
            read_key,
            fields: settings.field_map(),
        })
    }

    /// Field mapping used for both directions
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// URL that publishes `reading`
    pub fn update_url(&self, reading: &Reading) -> Result<Url, FeedError> {
        let mut url = self.endpoint("update")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.write_key);
            for (field, value) in self.fields.pairs(reading) {
                query.append_pair(field, &value.to_string());
            }
        }
        Ok(url)
    }

    /// URL that fetches `window`, relative to `now`
    ///
    /// A `LastHours` window reaching before the earliest representable
    /// timestamp is rejected as an invalid URL.
    pub fn feeds_url(&self, window: FeedWindow, now: DateTime<Utc>) -> Result<Url, FeedError> {
        let mut url = self.endpoint(&format!("channels/{}/feeds.json", self.channel_id))?;
        {
            let mut query = url.query_pairs_mut();
            match window {
                FeedWindow::LastHours(hours) => {
                    let start = now
                        .checked_sub_signed(ChronoDuration::hours(i64::from(hours)))
                        .ok_or_else(|| {
                            FeedError::InvalidUrl(format!("{} hour window is out of range", hours))
                        })?;
                    query.append_pair("start", &start.format(FEED_TIME_FORMAT).to_string());
                    query.append_pair("end", &now.format(FEED_TIME_FORMAT).to_string());
                }
                FeedWindow::LastResults(results) => {
                    query.append_pair("results", &results.to_string());
                }
            }
            if let Some(ref key) = self.read_key {
                query.append_pair("api_key", key);
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, FeedError> {
        self.base_url
            .join(path)
            .map_err(|e| FeedError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }
}

impl Publisher for ThingSpeakClient {
    async fn publish(&mut self, reading: &Reading) -> Result<(), FeedError> {
        let url = self.update_url(reading)?;
        debug!(
            speed = reading.speed,
            rpm = reading.rpm,
            fuel = reading.fuel,
            temp = reading.temp,
            "publishing reading"
        );

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

impl FeedReader for ThingSpeakClient {
    async fn fetch(&self, window: FeedWindow) -> Result<Vec<FeedSample>, FeedError> {
        let url = self.feeds_url(window, Utc::now())?;
        debug!(channel = self.channel_id, ?window, "fetching feeds");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let samples = decode_feeds(&body, &self.fields)?;
        debug!(count = samples.len(), "decoded feed samples");
        Ok(samples)
    }
}

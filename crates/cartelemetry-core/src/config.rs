//! Application settings
//!
//! Settings live in an `appsettings.json` file with a single `ThingSpeak`
//! section. Every key is optional and falls back to a default, except that
//! the simulator needs a write key and the analyzer needs a channel id.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::driver::TripPlan;
use crate::feed::FieldMap;

/// Default settings file name
pub const SETTINGS_FILE: &str = "appsettings.json";

/// Errors that can occur loading or validating settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found (looked in: {})", display_paths(.0))]
    NotFound(Vec<PathBuf>),

    #[error("Could not read settings: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} is missing from the settings")]
    MissingCredential(&'static str),

    #[error("{field} {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Root of the settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    /// Channel and trip settings
    #[serde(default)]
    pub thing_speak: ChannelSettings,
}

/// Channel credentials, field mapping and trip timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChannelSettings {
    /// Key used to publish readings
    pub write_api_key: String,

    /// Key used to read the channel (blank for public channels)
    pub read_api_key: String,

    /// Numeric channel id
    pub channel_id: u64,

    pub field_speed: String,
    pub field_rpm: String,
    pub field_fuel: String,
    pub field_temp: String,

    /// Seconds between ticks
    pub update_interval_seconds: u64,

    /// Length of a simulated trip in minutes
    pub trip_duration_minutes: u64,

    /// Channel API root
    pub base_url: String,

    /// Per-request HTTP timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        let fields = FieldMap::default();
        Self {
            write_api_key: String::new(),
            read_api_key: String::new(),
            channel_id: 0,
            field_speed: fields.speed,
            field_rpm: fields.rpm,
            field_fuel: fields.fuel,
            field_temp: fields.temp,
            update_interval_seconds: 15,
            trip_duration_minutes: 10,
            base_url: "https://api.thingspeak.com".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

impl ChannelSettings {
    /// Field mapping for the channel schema
    pub fn field_map(&self) -> FieldMap {
        FieldMap {
            speed: self.field_speed.clone(),
            rpm: self.field_rpm.clone(),
            fuel: self.field_fuel.clone(),
            temp: self.field_temp.clone(),
        }
    }

    /// Tick interval and trip length
    pub fn trip_plan(&self) -> TripPlan {
        TripPlan {
            interval: Duration::from_secs(self.update_interval_seconds),
            duration: Duration::from_secs(self.trip_duration_minutes.saturating_mul(60)),
        }
    }

    /// HTTP request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }

    /// Check everything the simulator needs before a trip starts
    pub fn validate_for_simulation(&self) -> Result<(), ConfigError> {
        if self.write_api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("WriteApiKey"));
        }
        if self.update_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "UpdateIntervalSeconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.trip_duration_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "TripDurationMinutes",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.validate_fields()
    }

    /// Check everything the analyzer needs before fetching
    pub fn validate_for_analysis(&self) -> Result<(), ConfigError> {
        if self.channel_id == 0 {
            return Err(ConfigError::MissingCredential("ChannelId"));
        }
        self.validate_fields()
    }

    fn validate_fields(&self) -> Result<(), ConfigError> {
        let fields = [
            ("FieldSpeed", &self.field_speed),
            ("FieldRpm", &self.field_rpm),
            ("FieldFuel", &self.field_fuel),
            ("FieldTemp", &self.field_temp),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: name,
                    reason: "must name a channel field".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl AppSettings {
    /// Parse settings from JSON text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load settings from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Write settings as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Candidate settings locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SETTINGS_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("cartelemetry").join(SETTINGS_FILE));
        }
        paths
    }

    /// Find the settings file
    ///
    /// An explicit path must exist. Otherwise the first existing entry of
    /// [`AppSettings::search_paths`] wins.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let candidates = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => Self::search_paths(),
        };
        if let Some(found) = candidates.iter().find(|p| p.is_file()).cloned() {
            return Ok(found);
        }
        Err(ConfigError::NotFound(candidates))
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_from_empty_section() {
        let settings = AppSettings::parse(r#"{"ThingSpeak": {}}"#).unwrap();
        let ts = settings.thing_speak;
        assert_eq!(ts.update_interval_seconds, 15);
        assert_eq!(ts.trip_duration_minutes, 10);
        assert_eq!(ts.field_map(), FieldMap::default());
        assert_eq!(ts.base_url, "https://api.thingspeak.com");
    }

    #[test]
    fn test_parse_pascal_case_keys() {
        let json = r#"{
            "ThingSpeak": {
                "WriteApiKey": "W1",
                "ReadApiKey": "R1",
                "ChannelId": 3012345,
                "FieldTemp": "field8",
                "UpdateIntervalSeconds": 30,
                "TripDurationMinutes": 2
            }
        }"#;
        let ts = AppSettings::parse(json).unwrap().thing_speak;
        assert_eq!(ts.write_api_key, "W1");
        assert_eq!(ts.channel_id, 3012345);
        assert_eq!(ts.field_temp, "field8");
        assert_eq!(
            ts.trip_plan(),
            TripPlan {
                interval: Duration::from_secs(30),
                duration: Duration::from_secs(120),
            }
        );
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let settings = AppSettings::parse("{}").unwrap();
        assert!(settings.thing_speak.write_api_key.is_empty());
    }

    #[test]
    fn test_huge_trip_duration_saturates() {
        let ts = ChannelSettings {
            trip_duration_minutes: u64::MAX,
            ..ChannelSettings::default()
        };
        assert_eq!(ts.trip_plan().duration, Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_simulation_requires_write_key() {
        let ts = ChannelSettings::default();
        assert!(matches!(
            ts.validate_for_simulation(),
            Err(ConfigError::MissingCredential("WriteApiKey"))
        ));

        let ts = ChannelSettings {
            write_api_key: "  ".into(),
            ..ChannelSettings::default()
        };
        assert!(ts.validate_for_simulation().is_err());
    }

    #[test]
    fn test_simulation_rejects_zero_timing() {
        let ts = ChannelSettings {
            write_api_key: "W".into(),
            update_interval_seconds: 0,
            ..ChannelSettings::default()
        };
        assert!(matches!(
            ts.validate_for_simulation(),
            Err(ConfigError::InvalidValue {
                field: "UpdateIntervalSeconds",
                ..
            })
        ));
    }

    #[test]
    fn test_analysis_requires_channel() {
        let ts = ChannelSettings::default();
        assert!(matches!(
            ts.validate_for_analysis(),
            Err(ConfigError::MissingCredential("ChannelId"))
        ));

        let ts = ChannelSettings {
            channel_id: 7,
            ..ChannelSettings::default()
        };
        assert!(ts.validate_for_analysis().is_ok());
    }

    #[test]
    fn test_blank_field_name_rejected() {
        let ts = ChannelSettings {
            channel_id: 7,
            field_rpm: String::new(),
            ..ChannelSettings::default()
        };
        assert!(matches!(
            ts.validate_for_analysis(),
            Err(ConfigError::InvalidValue {
                field: "FieldRpm",
                ..
            })
        ));
    }
}

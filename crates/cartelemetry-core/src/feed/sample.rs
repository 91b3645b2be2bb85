//! Channel field mapping and feed decoding

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::FeedError;
use crate::vehicle::Reading;

/// Channel field names for the four telemetry values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub speed: String,
    pub rpm: String,
    pub fuel: String,
    pub temp: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            speed: "field1".to_string(),
            rpm: "field2".to_string(),
            fuel: "field3".to_string(),
            temp: "field4".to_string(),
        }
    }
}

impl FieldMap {
    /// Pair each field name with the matching value of `reading`
    pub fn pairs<'a>(&'a self, reading: &Reading) -> [(&'a str, f64); 4] {
        [
            (self.speed.as_str(), reading.speed),
            (self.rpm.as_str(), reading.rpm),
            (self.fuel.as_str(), reading.fuel),
            (self.temp.as_str(), reading.temp),
        ]
    }
}

/// One historical record pulled back from the channel
///
/// Each field is `None` when the record had no usable value for it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeedSample {
    pub speed: Option<f64>,
    pub rpm: Option<f64>,
    pub fuel: Option<f64>,
    pub temp: Option<f64>,
}

impl FeedSample {
    fn from_record(record: &HashMap<String, Value>, fields: &FieldMap) -> Self {
        Self {
            speed: parse_field_value(record.get(&fields.speed)),
            rpm: parse_field_value(record.get(&fields.rpm)),
            fuel: parse_field_value(record.get(&fields.fuel)),
            temp: parse_field_value(record.get(&fields.temp)),
        }
    }
}

/// Feeds endpoint response; only the records matter here
#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    feeds: Option<Vec<HashMap<String, Value>>>,
}

/// Parse a single channel field value
///
/// Channels store fields as strings, but plain JSON numbers are accepted
/// too. Anything that is not a finite number yields `None`.
pub fn parse_field_value(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Decode a feeds response body into samples
///
/// A response without a `feeds` array decodes to no samples.
pub fn decode_feeds(body: &str, fields: &FieldMap) -> Result<Vec<FeedSample>, FeedError> {
    let response: FeedResponse = serde_json::from_str(body)?;
    Ok(response
        .feeds
        .unwrap_or_default()
        .iter()
        .map(|record| FeedSample::from_record(record, fields))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_field_value() {
        assert_eq!(parse_field_value(Some(&json!("42.5"))), Some(42.5));
        assert_eq!(parse_field_value(Some(&json!(" 7 "))), Some(7.0));
        assert_eq!(parse_field_value(Some(&json!(13))), Some(13.0));
        assert_eq!(parse_field_value(Some(&json!(null))), None);
        assert_eq!(parse_field_value(Some(&json!("abc"))), None);
        assert_eq!(parse_field_value(Some(&json!(""))), None);
        assert_eq!(parse_field_value(Some(&json!("NaN"))), None);
        assert_eq!(parse_field_value(Some(&json!(true))), None);
        assert_eq!(parse_field_value(None), None);
    }

    #[test]
    fn test_decode_feeds_maps_fields() {
        let body = r#"{
            "channel": {"id": 1234, "name": "Car"},
            "feeds": [
                {"created_at": "2026-10-19T10:00:00Z", "entry_id": 1,
                 "field1": "10.5", "field2": "1255.0", "field3": "99.9", "field4": "86"},
                {"created_at": "2026-10-19T10:00:15Z", "entry_id": 2,
                 "field1": null, "field2": "oops", "field3": "99.8"}
            ]
        }"#;

        let samples = decode_feeds(body, &FieldMap::default()).unwrap();
        assert_eq!(
            samples,
            vec![
                FeedSample {
                    speed: Some(10.5),
                    rpm: Some(1255.0),
                    fuel: Some(99.9),
                    temp: Some(86.0),
                },
                FeedSample {
                    speed: None,
                    rpm: None,
                    fuel: Some(99.8),
                    temp: None,
                },
            ]
        );
    }

    #[test]
    fn test_decode_feeds_custom_mapping() {
        let fields = FieldMap {
            speed: "field5".into(),
            rpm: "field6".into(),
            fuel: "field7".into(),
            temp: "field8".into(),
        };
        let body = r#"{"feeds": [{"field1": "1", "field5": "55"}]}"#;

        let samples = decode_feeds(body, &fields).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].speed, Some(55.0));
        assert_eq!(samples[0].rpm, None);
    }

    #[test]
    fn test_decode_feeds_missing_or_null_array() {
        assert!(decode_feeds("{}", &FieldMap::default()).unwrap().is_empty());
        assert!(decode_feeds(r#"{"feeds": null}"#, &FieldMap::default())
            .unwrap()
            .is_empty());
        assert!(decode_feeds("-1", &FieldMap::default()).is_err());
    }
}

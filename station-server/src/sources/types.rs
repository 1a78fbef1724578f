//! Search API response DTOs.
//!
//! These mirror the opendatasoft `records/1.0/search` envelope. Only the
//! fields we read are declared; everything is optional because the feed
//! both omits and nulls values.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Outer object returned by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    /// Total matching records server-side (may exceed the page size).
    pub nhits: Option<u64>,

    /// Records on this page, in server order.
    pub records: Option<Vec<RawRecord>>,
}

/// One record of the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub fields: RawFields,
}

/// Station fields of a record.
///
/// A field of the wrong type reads as absent rather than failing the whole
/// envelope, so it is defaulted like a missing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFields {
    /// Street address of the dock.
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,

    /// Bikes ready to rent.
    #[serde(default, deserialize_with = "lenient_count")]
    pub available: Option<i32>,

    /// Empty docks.
    #[serde(default, deserialize_with = "lenient_count")]
    pub free: Option<i32>,
}

/// Read a string, `None` for null or any other JSON type.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Read a count from an integer, an integral float (`3.0`) or a numeric
/// string (`"3"`, `"3.0"`). Anything else, or a value outside `i32`, is
/// `None`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .or_else(|| n.as_f64().and_then(integral_i32)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_i32))
        }
        _ => None,
    })
}

fn integral_i32(f: f64) -> Option<i32> {
    if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_records_key() {
        let envelope: SearchEnvelope = serde_json::from_str(r#"{"nhits": 0}"#).unwrap();
        assert!(envelope.records.is_none());
    }

    #[test]
    fn null_and_missing_fields() {
        let json = r#"{"records": [
            {"fields": {"address": null, "available": 3}},
            {"recordid": "abc"}
        ]}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        let records = envelope.records.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields.address, None);
        assert_eq!(records[0].fields.available, Some(3));
        assert_eq!(records[0].fields.free, None);
        assert_eq!(records[1].fields.available, None);
    }

    #[test]
    fn lenient_counts() {
        let json = r#"{"records": [
            {"fields": {"address": "A", "available": 3.0, "free": "4"}},
            {"fields": {"address": "B", "available": "2.0", "free": " 7 "}},
            {"fields": {"address": "C", "available": 2.5, "free": "many"}},
            {"fields": {"address": "D", "available": true, "free": 99999999999}},
            {"fields": {"address": 12, "available": [1], "free": {"n": 1}}}
        ]}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        let fields: Vec<_> = envelope
            .records
            .unwrap()
            .into_iter()
            .map(|r| (r.fields.address, r.fields.available, r.fields.free))
            .collect();

        assert_eq!(
            fields,
            vec![
                (Some("A".to_string()), Some(3), Some(4)),
                (Some("B".to_string()), Some(2), Some(7)),
                (Some("C".to_string()), None, None),
                (Some("D".to_string()), None, None),
                (None, None, None),
            ]
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let json = r#"{"nhits": 276, "parameters": {"rows": 100}, "records": [
            {"datasetid": "x", "fields": {"address": "Puerto", "available": 9, "free": 1, "number": 12}}
        ]}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.nhits, Some(276));
        let records = envelope.records.unwrap();
        assert_eq!(records[0].fields.address.as_deref(), Some("Puerto"));
    }
}

//! Backend Timestamps
//!
//! バックエンドは UTC のタイムスタンプをオフセット無し（naive）で返すことがあります。
//! このモジュールは RFC 3339 と naive 形式の両方を受け付け、常に UTC として扱います。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// naive 形式のフォーマット（小数秒は任意）
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// タイムスタンプ文字列を UTC に変換
///
/// ## Returns
/// 解釈できない場合は `None`
///
/// ## Examples
/// ```rust
/// use kernel::time::parse_timestamp;
/// assert!(parse_timestamp("2025-01-31T12:00:00Z").is_some());
/// assert!(parse_timestamp("2025-01-31T12:00:00.123456").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// `#[serde(with = "kernel::time::lenient")]` 用
pub mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// `#[serde(with = "kernel::time::lenient_option", default)]` 用
pub mod lenient_option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Record {
        #[serde(with = "lenient_option", default)]
        expiry: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2025-03-01T09:00:00+09:00").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse_timestamp("2025-03-01T09:30:15.5").unwrap();
        assert_eq!(dt.day(), 1);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_option_field() {
        let record: Record = serde_json::from_str(r#"{"expiry":"2025-03-01T09:30:15"}"#).unwrap();
        assert!(record.expiry.is_some());

        let record: Record = serde_json::from_str(r#"{"expiry":null}"#).unwrap();
        assert!(record.expiry.is_none());

        let record: Record = serde_json::from_str("{}").unwrap();
        assert!(record.expiry.is_none());

        assert!(serde_json::from_str::<Record>(r#"{"expiry":"soon"}"#).is_err());
    }
}

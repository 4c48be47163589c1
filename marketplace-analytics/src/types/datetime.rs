use crate::domain::lenient::parse_timestamp_str;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// クエリパラメータ用の任意日時
///
/// RFC 3339、`YYYY-MM-DD`、エポック秒を受け付ける。レコードと違い、
/// 解釈できない値はリクエストエラーにする。
pub mod optional_timestamp {
    use super::*;

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Epoch(i64),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => parse_timestamp_str(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: '{}'", s))),
            Some(Raw::Epoch(ts)) => DateTime::from_timestamp(ts, 0)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("Invalid timestamp")),
            None => Ok(None),
        }
    }
}

// marketplace-analytics/src/domain/lenient.rs

//! ドキュメントDBから届くレコード用の寛容なデシリアライザ群。
//!
//! スナップショット内の1件が壊れていてもダッシュボード全体を落とさないため、
//! 数値は 0、日時やオプション値は `None` に丸める。ここでエラーは返さない。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// ミリ秒エポックとみなす閾値（西暦5138年相当の秒数）
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// 数値または数値文字列を有限・非負のf64として読む。それ以外は0
pub fn non_negative_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value)
        .filter(|v| *v >= 0.0)
        .unwrap_or(0.0))
}

/// 1..=5 の星評価を読む。範囲外・非数値は0
pub fn star_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_star(&value).unwrap_or(0))
}

/// 任意項目の星評価。範囲外・非数値は None
pub fn optional_star_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_star(&value))
}

/// 文字列項目。数値はそのまま文字列化し、その他は空文字
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(&value).unwrap_or_default())
}

/// 任意の文字列項目。空文字は None として扱う
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(&value).filter(|s| !s.trim().is_empty()))
}

/// 日時項目。RFC 3339、`YYYY-MM-DD`、エポック秒/ミリ秒、
/// `{ "seconds": .., "nanoseconds": .. }` 形式のタイムスタンプを受け付ける
pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_timestamp(&value))
}

pub fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn coerce_star(value: &Value) -> Option<u8> {
    let rating = coerce_f64(value)?;
    if rating.fract() != 0.0 || !(1.0..=5.0).contains(&rating) {
        return None;
    }
    Some(rating as u8)
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n.as_i64().and_then(from_epoch),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}

/// クエリパラメータ等の文字列から日時を読む
pub fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    s.parse::<i64>().ok().and_then(from_epoch)
}

fn from_epoch(raw: i64) -> Option<DateTime<Utc>> {
    if raw.abs() >= MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(raw)
    } else {
        DateTime::from_timestamp(raw, 0)
    }
}

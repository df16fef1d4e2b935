//! Lenient deserializers for server payloads
//!
//! The backend serializes ids as numbers in some places and strings in
//! others, money as JSON numbers, and timestamps as ISO local date-times
//! with or without fractional seconds.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Deserialize optional ID that can be number or string
pub(crate) fn deserialize_optional_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

fn decimal_from_json<E: serde::de::Error>(value: JsonValue) -> std::result::Result<Option<Decimal>, E> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map(Some)
            .map_err(|e| E::custom(format!("invalid decimal: {}", e))),
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| E::custom(format!("invalid decimal: {}", e))),
        _ => Err(E::custom("expected number or string for amount")),
    }
}

/// Deserialize amount that can be number or string
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    Ok(decimal_from_json(value)?.unwrap_or_default())
}

/// Deserialize optional amount that can be number, string or null
pub(crate) fn deserialize_optional_amount<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(v) => decimal_from_json(v),
        None => Ok(None),
    }
}

/// Parse an ISO local date-time, accepting a bare date as midnight
pub(crate) fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").ok())
        .or_else(|| {
            raw.parse::<NaiveDate>()
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Deserialize an optional timestamp; unparseable values become `None`
pub(crate) fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(JsonValue::String(s)) => parse_local_datetime(&s),
        _ => None,
    })
}

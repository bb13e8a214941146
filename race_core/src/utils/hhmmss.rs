//! Serde helper for durations written as "HH:MM:SS", the wire format the
//! competition-format service uses for intervals and gaps.

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

pub fn serialize<S>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let total = delta.num_seconds();
    let formatted = format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    );
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(D::Error::custom)
}

pub fn parse(raw: &str) -> Result<TimeDelta, String> {
    let mut parts = raw.split(':');
    let (Some(h), Some(m), Some(s), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected HH:MM:SS, got {raw:?}"));
    };
    let hours: i64 = h.parse().map_err(|_| format!("invalid hours in {raw:?}"))?;
    let minutes: i64 = m
        .parse()
        .map_err(|_| format!("invalid minutes in {raw:?}"))?;
    let seconds: i64 = s
        .parse()
        .map_err(|_| format!("invalid seconds in {raw:?}"))?;
    if minutes > 59 || seconds > 59 {
        return Err(format!("minutes and seconds must be below 60 in {raw:?}"));
    }
    Ok(TimeDelta::seconds(hours * 3600 + minutes * 60 + seconds))
}

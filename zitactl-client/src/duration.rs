//! `google.protobuf.Duration` in its proto3 JSON form (`"1.500s"`).
//!
//! Use as `#[serde(default, with = "crate::duration", skip_serializing_if = "Option::is_none")]`
//! on `Option<std::time::Duration>` fields.

use serde::{Deserialize, Deserializer, Serializer, de};
use std::time::Duration;

pub fn format(duration: &Duration) -> String {
    let secs = duration.as_secs();
    let nanos = duration.subsec_nanos();
    if nanos == 0 {
        return format!("{secs}s");
    }
    let frac = format!("{nanos:09}");
    format!("{secs}.{}s", frac.trim_end_matches('0'))
}

pub fn parse(text: &str) -> Result<Duration, String> {
    let body = text
        .strip_suffix('s')
        .ok_or_else(|| format!("duration '{text}' must end with 's'"))?;
    if body.starts_with('-') {
        return Err(format!("negative duration '{text}' is not supported"));
    }

    let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
    let secs: u64 = whole
        .parse()
        .map_err(|_| format!("invalid seconds in duration '{text}'"))?;

    if frac.len() > 9 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid fraction in duration '{text}'"));
    }
    let nanos = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<9}")
            .parse::<u32>()
            .map_err(|_| format!("invalid fraction in duration '{text}'"))?
    };

    Ok(Duration::new(secs, nanos))
}

pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serializer.serialize_str(&format(d)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse(&s).map_err(de::Error::custom)).transpose()
}

//! Conversions between Terraform values and Zitadel types.

use crate::error::ProviderError;
use std::time::Duration;
use tf_provider::value::Value;
use zitactl_client::ProtoEnum;

/// List of strings as Terraform sends it.
pub type StringList = Value<Vec<Value<String>>>;

/// The string if it is known and not null.
pub fn known_str(value: &Value<String>) -> Option<&str> {
    match value {
        Value::Value(s) => Some(s.as_str()),
        _ => None,
    }
}

/// The string if it is known, not null and not empty.
pub fn non_empty_str(value: &Value<String>) -> Option<&str> {
    known_str(value).filter(|s| !s.is_empty())
}

/// Null and unknown become the empty string.
pub fn string_or_default(value: &Value<String>) -> String {
    known_str(value).unwrap_or_default().to_string()
}

/// Null and unknown become `false`.
pub fn bool_or_default(value: &Value<bool>) -> bool {
    matches!(value, Value::Value(true))
}

pub fn string_value(s: impl Into<String>) -> Value<String> {
    Value::Value(s.into())
}

/// Known elements of a list; null and unknown lists are empty.
pub fn string_list(list: &StringList) -> Vec<String> {
    match list {
        Value::Value(items) => items
            .iter()
            .filter_map(|item| known_str(item).map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// An empty slice becomes a null list.
pub fn list_value<S: AsRef<str>>(items: &[S]) -> StringList {
    if items.is_empty() {
        return Value::Null;
    }
    Value::Value(items.iter().map(|s| string_value(s.as_ref())).collect())
}

/// Protobuf names of `items`; empty becomes a null list.
pub fn enum_list_value<E: ProtoEnum>(items: &[E]) -> StringList {
    let names: Vec<&str> = items.iter().map(|e| e.as_str()).collect();
    list_value(&names)
}

/// Parses a single enum attribute. Null and unknown yield `None`.
pub fn parse_enum<E: ProtoEnum>(attribute: &str, value: &Value<String>) -> Result<Option<E>, ProviderError> {
    match known_str(value) {
        Some(name) => enum_from_name(attribute, name).map(Some),
        None => Ok(None),
    }
}

/// Parses every known element of a list of enum names.
pub fn parse_enum_list<E: ProtoEnum>(attribute: &str, list: &StringList) -> Result<Vec<E>, ProviderError> {
    string_list(list)
        .iter()
        .map(|name| enum_from_name(attribute, name))
        .collect()
}

fn enum_from_name<E: ProtoEnum>(attribute: &str, name: &str) -> Result<E, ProviderError> {
    E::from_name(name).ok_or_else(|| {
        ProviderError::new(
            format!("Invalid {attribute}"),
            format!(
                "The provided {attribute} '{name}' is not valid. Valid values are: {}",
                E::names().join(", ")
            ),
        )
        .at(attribute)
    })
}

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Parses a duration like `300ms`, `1.5s` or `1h2m3s`. Negative durations
/// are rejected.
pub fn parse_duration(text: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid duration \"{text}\"");

    let mut rest = text.strip_prefix('+').unwrap_or(text);
    if rest.starts_with('-') {
        return Err(format!("negative duration \"{text}\" is not allowed"));
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration \"{text}\""))?;
        let (number, tail) = rest.split_at(number_end);

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);

        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SECOND,
            "m" => 60 * NANOS_PER_SECOND,
            "h" => 3_600 * NANOS_PER_SECOND,
            _ => return Err(format!("unknown unit \"{unit}\" in duration \"{text}\"")),
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        if fraction.contains('.') {
            return Err(invalid());
        }

        let mut value = whole.checked_mul(scale).ok_or_else(invalid)?;
        if !fraction.is_empty() {
            let mut digits: u128 = 0;
            let mut divisor: u128 = 1;
            for c in fraction.chars().take(18) {
                digits = digits * 10 + u128::from(c.to_digit(10).ok_or_else(invalid)?);
                divisor *= 10;
            }
            value += digits * scale / divisor;
        }

        total = total.checked_add(value).ok_or_else(invalid)?;
        rest = next;
    }

    if total > i64::MAX as u128 {
        return Err(format!("duration \"{text}\" is out of range"));
    }
    let secs = u64::try_from(total / NANOS_PER_SECOND).map_err(|_| invalid())?;
    let nanos = u32::try_from(total % NANOS_PER_SECOND).map_err(|_| invalid())?;
    Ok(Duration::new(secs, nanos))
}

/// Formats a duration the way [`parse_duration`] reads it: `0s`, `500ms`,
/// `1.5s`, `1m30s`, `2h0m0s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SECOND {
        let (scale, unit) = match nanos {
            n if n < 1_000 => (1, "ns"),
            n if n < 1_000_000 => (1_000, "µs"),
            _ => (1_000_000, "ms"),
        };
        return format!("{}{unit}", decimal(nanos, scale));
    }

    let secs = duration.as_secs();
    let hours = secs / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = u128::from(secs % 60) * NANOS_PER_SECOND + u128::from(duration.subsec_nanos());
    let seconds = format!("{}s", decimal(seconds, NANOS_PER_SECOND));

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}")
    } else {
        seconds
    }
}

/// `value / scale` with trailing fractional zeros dropped.
fn decimal(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let fraction = format!("{fraction:0width$}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Planning: a computed value the configuration leaves unset is recomputed
/// by the apply, so it becomes unknown.
pub fn unknown_if_unset<T>(planned: &mut Value<T>, config: &Value<T>) {
    if matches!(config, Value::Null) {
        *planned = Value::Unknown;
    }
}

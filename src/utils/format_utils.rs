use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("static regex is valid"));

/// Loosely typed value as it shows up in PlayerDB `meta` and account objects.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    Text(&'a str),
    List(Vec<MetaValue<'a>>),
    Timestamp(DateTime<Utc>),
    Object(&'a Map<String, Value>),
}

impl<'a> From<&'a Value> for MetaValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => MetaValue::Null,
            Value::Bool(b) => MetaValue::Bool(*b),
            Value::Number(n) => MetaValue::Number(n),
            Value::String(s) => MetaValue::Text(s),
            Value::Array(items) => MetaValue::List(items.iter().map(MetaValue::from).collect()),
            Value::Object(map) => MetaValue::Object(map),
        }
    }
}

/// Renders a value for display. `None` means the value should not be shown at all;
/// an empty string is never returned.
pub fn format_value(value: &MetaValue<'_>) -> Option<String> {
    let formatted = match value {
        MetaValue::Null => None,
        MetaValue::Bool(true) => Some("Yes".to_string()),
        MetaValue::Bool(false) => Some("No".to_string()),
        MetaValue::Number(n) => Some(format_number(n)),
        MetaValue::Text(s) => Some(s.trim().to_string()),
        MetaValue::List(items) => {
            let parts: Vec<String> = items.iter().filter_map(format_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        MetaValue::Timestamp(at) => Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        MetaValue::Object(map) => serde_json::to_string(map).ok(),
    };

    formatted.filter(|s| !s.is_empty())
}

pub fn format_json_value(value: &Value) -> Option<String> {
    format_value(&MetaValue::from(value))
}

// Whole floats print without a trailing ".0" so 3.0 and 3 look the same.
pub fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Turns a machine key into a label: `last_online` -> `Last Online`,
/// `firstName` -> `First Name`.
pub fn prettify_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let spaced = CAMEL_BOUNDARY.replace_all(&spaced, "$1 $2");

    let mut out = String::with_capacity(spaced.len());
    let mut word_start = true;
    for ch in spaced.chars() {
        if word_start {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        word_start = ch.is_whitespace();
    }

    out.trim().to_string()
}

/// Formats every entry of `fields` except the skipped keys, storing survivors
/// under their prettified key. Later keys win when two prettify to the same label.
pub fn format_fields<'a, I>(fields: I, skip: &[&str]) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut formatted = BTreeMap::new();
    for (key, value) in fields {
        if skip.contains(&key.as_str()) {
            continue;
        }
        if let Some(text) = format_json_value(value) {
            formatted.insert(prettify_key(key), text);
        }
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("last_online", "Last Online")]
    #[case("firstName", "First Name")]
    #[case("name_history", "Name History")]
    #[case("gamerscore", "Gamerscore")]
    #[case("accountTier", "Account Tier")]
    #[case("XUID", "XUID")]
    #[case("_private", "Private")]
    #[case("steam_profileURL", "Steam Profile URL")]
    fn test_prettify_key(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(prettify_key(key), expected);
    }

    #[rstest]
    #[case(json!(true), Some("Yes"))]
    #[case(json!(false), Some("No"))]
    #[case(json!(null), None)]
    #[case(json!("  padded  "), Some("padded"))]
    #[case(json!("   "), None)]
    #[case(json!(42), Some("42"))]
    #[case(json!(-7), Some("-7"))]
    #[case(json!(3.0), Some("3"))]
    #[case(json!(1.25), Some("1.25"))]
    #[case(json!(76561197960287930u64), Some("76561197960287930"))]
    #[case(json!([]), None)]
    #[case(json!([null, "", " "]), None)]
    #[case(json!(["a", null, 2, true]), Some("a, 2, Yes"))]
    #[case(json!({"tier": "gold"}), Some("{\"tier\":\"gold\"}"))]
    fn test_format_json_value(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(format_json_value(&value).as_deref(), expected);
    }

    #[test]
    fn test_format_nested_lists_flatten_with_separator() {
        let value = json!([["a", "b"], [], "c"]);
        assert_eq!(format_json_value(&value).as_deref(), Some("a, b, c"));
    }

    #[test]
    fn test_format_object_keeps_source_key_order() {
        let value = json!({"zeta": 1, "alpha": [1, 2]});
        assert_eq!(
            format_json_value(&value).as_deref(),
            Some("{\"zeta\":1,\"alpha\":[1,2]}")
        );
    }

    #[test]
    fn test_format_timestamp_is_iso_8601() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            format_value(&MetaValue::Timestamp(at)).as_deref(),
            Some("2024-01-02T03:04:05.000Z")
        );
    }

    #[test]
    fn test_format_fields_skips_and_drops_empty() {
        let source = json!({
            "id": "1",
            "followers": 12,
            "bio": "",
            "verified": false,
            "last_seen": null
        });
        let map = source.as_object().unwrap();
        let fields = format_fields(map, &["id"]);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("Followers").map(String::as_str), Some("12"));
        assert_eq!(fields.get("Verified").map(String::as_str), Some("No"));
        assert!(fields.values().all(|v| !v.is_empty()));
    }
}

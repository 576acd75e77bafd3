//! Strict parsing of the model's reply

use crate::error::ExtractorError;
use crate::types::ExtractedFields;
use pacer_domain::Sex;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};
use std::fmt;

/// Key holding the sex code (`"M"` / `"K"`)
pub const SEX_KEY: &str = "sex";

/// Key holding the age in years
pub const AGE_KEY: &str = "age";

/// Key holding the 5 km pace in minutes per kilometre
pub const PACE_KEY: &str = "pace";

const EXPECTED_KEYS: [&str; 3] = [SEX_KEY, AGE_KEY, PACE_KEY];

/// Parse the model's reply into extracted fields
///
/// The reply must be exactly one JSON object with exactly the keys `sex`,
/// `age` and `pace`. Surrounding whitespace is allowed; anything else around
/// the object (code fences, prose, trailing commentary) is rejected, and so is
/// a key given twice. Values are never coerced: `"37"` is not an age.
pub fn parse_fields(response: &str) -> Result<ExtractedFields, ExtractorError> {
    let UniqueObject(obj) = serde_json::from_str(response)?;

    check_keys(&obj)?;

    Ok(ExtractedFields {
        sex: parse_sex(&obj[SEX_KEY])?,
        age: parse_age(&obj[AGE_KEY])?,
        pace: parse_pace(&obj[PACE_KEY])?,
    })
}

/// Top-level JSON object whose keys are all distinct
///
/// `serde_json::Map` keeps the last of repeated keys; this refuses them.
struct UniqueObject(Map<String, Value>);

impl<'de> Deserialize<'de> for UniqueObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UniqueObjectVisitor)
    }
}

struct UniqueObjectVisitor;

impl<'de> Visitor<'de> for UniqueObjectVisitor {
    type Value = UniqueObject;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key '{}'", key)));
            }
            let value: Value = access.next_value()?;
            map.insert(key, value);
        }
        Ok(UniqueObject(map))
    }
}

fn check_keys(obj: &Map<String, Value>) -> Result<(), ExtractorError> {
    let missing: Vec<&str> = EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|key| !obj.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ExtractorError::MalformedOutput(format!(
            "Missing key(s): {}",
            missing.join(", ")
        )));
    }

    let unexpected: Vec<&str> = obj
        .keys()
        .map(String::as_str)
        .filter(|key| !EXPECTED_KEYS.contains(key))
        .collect();
    if !unexpected.is_empty() {
        return Err(ExtractorError::MalformedOutput(format!(
            "Unexpected key(s): {}",
            unexpected.join(", ")
        )));
    }

    Ok(())
}

fn parse_sex(value: &Value) -> Result<Option<Sex>, ExtractorError> {
    match value {
        Value::Null => Ok(None),
        Value::String(code) => Sex::from_code(code).map(Some).ok_or_else(|| {
            ExtractorError::MalformedOutput(format!(
                "Invalid '{}': expected \"M\" or \"K\", got {:?}",
                SEX_KEY, code
            ))
        }),
        other => Err(invalid(SEX_KEY, "a string or null", other)),
    }
}

fn parse_age(value: &Value) -> Result<Option<u32>, ExtractorError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| invalid(AGE_KEY, "a non-negative integer", value)),
        other => Err(invalid(AGE_KEY, "an integer or null", other)),
    }
}

fn parse_pace(value: &Value) -> Result<Option<f64>, ExtractorError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(Some)
            .ok_or_else(|| invalid(PACE_KEY, "a non-negative number", value)),
        other => Err(invalid(PACE_KEY, "a number or null", other)),
    }
}

fn invalid(key: &str, expected: &str, got: &Value) -> ExtractorError {
    ExtractorError::MalformedOutput(format!(
        "Invalid '{}': expected {}, got {}",
        key, expected, got
    ))
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the record model treats malformed JSON input.
///
/// Lenient matches the historical store behavior: bad fields fall back to
/// empty/zero instead of failing the whole operation. Strict rejects anything
/// that does not parse as a well-formed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: u64,
}

impl Record {
    pub fn from_json(text: &str, policy: ParsePolicy) -> anyhow::Result<Self> {
        match policy {
            ParsePolicy::Strict => {
                serde_json::from_str(text).map_err(|err| anyhow::anyhow!("invalid record: {err}"))
            }
            ParsePolicy::Lenient => {
                let value = serde_json::from_str(text).unwrap_or(Value::Null);
                Ok(Self::from_value(&value))
            }
        }
    }

    /// Best-effort extraction: unknown fields are ignored, missing or
    /// wrongly-typed fields default to empty/zero. `age` also accepts a
    /// numeric string, which one stored-data variant used.
    fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };
        let text_field = |name: &str| {
            fields
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let age = match fields.get("age") {
            Some(Value::Number(number)) => number.as_u64().unwrap_or(0),
            Some(Value::String(text)) => text.parse().unwrap_or(0),
            _ => 0,
        };
        Self {
            id: text_field("id"),
            email: text_field("email"),
            age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, email: &str, age: u64) -> Record {
        Record {
            id: id.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[test]
    fn serializes_with_fixed_key_order_and_numeric_age() {
        let json = serde_json::to_string(&record("1", "a@b.com", 30)).unwrap();
        assert_eq!(json, r#"{"id":"1","email":"a@b.com","age":30}"#);
    }

    #[test]
    fn parses_full_record() {
        let parsed = Record::from_json(
            r#"{"id":"1","email":"a@b.com","age":30}"#,
            ParsePolicy::Lenient,
        )
        .unwrap();
        assert_eq!(parsed, record("1", "a@b.com", 30));
    }

    #[test]
    fn lenient_parse_defaults_missing_fields() {
        let parsed = Record::from_json(r#"{"id":"7"}"#, ParsePolicy::Lenient).unwrap();
        assert_eq!(parsed, record("7", "", 0));
    }

    #[test]
    fn lenient_parse_ignores_unknown_and_mistyped_fields() {
        let parsed = Record::from_json(
            r#"{"id":"7","email":42,"age":true,"color":"red"}"#,
            ParsePolicy::Lenient,
        )
        .unwrap();
        assert_eq!(parsed, record("7", "", 0));
    }

    #[test]
    fn lenient_parse_accepts_stringly_age() {
        let parsed = Record::from_json(r#"{"id":"7","age":"30"}"#, ParsePolicy::Lenient).unwrap();
        assert_eq!(parsed.age, 30);
    }

    #[test]
    fn lenient_parse_of_garbage_yields_default() {
        let parsed = Record::from_json("not json at all", ParsePolicy::Lenient).unwrap();
        assert_eq!(parsed, Record::default());
    }

    #[test]
    fn strict_parse_rejects_garbage() {
        assert!(Record::from_json("not json at all", ParsePolicy::Strict).is_err());
    }

    #[test]
    fn strict_parse_still_defaults_absent_fields() {
        let parsed = Record::from_json(r#"{"id":"9"}"#, ParsePolicy::Strict).unwrap();
        assert_eq!(parsed, record("9", "", 0));
    }

    #[test]
    fn roundtrip_preserves_data() {
        let original = record("42", "x@y.org", 99);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}

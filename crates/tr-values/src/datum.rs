//! Payload type carried by values and range outputs.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Untyped value payload.
///
/// Payloads keep the type the config gave them: `"2.5"` stays text and
/// `2.5` stays a float. Nothing converts between variants implicitly.
/// Every JSON/YAML shape has a variant, so no payload can be rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Datum>),
    Map(BTreeMap<String, Datum>),
}

impl Datum {
    /// Numeric view of the payload, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Null => f.write_str("null"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Reads command-line style input: booleans, then integers, then floats,
/// falling back to text.
impl FromStr for Datum {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(v) = trimmed.parse::<bool>() {
            return Ok(Self::Bool(v));
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(Self::Int(v));
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return Ok(Self::Float(v));
        }
        Ok(Self::Text(s.to_string()))
    }
}

impl From<bool> for Datum {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<Datum>> for Datum {
    fn from(v: Vec<Datum>) -> Self {
        Self::List(v)
    }
}

/// Deserialize a present key as `Some`, including an explicit `null`.
///
/// Pair with `#[serde(default)]` so that only a missing key is `None`.
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Datum>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Datum::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payloads_keep_their_type() {
        let xs: Vec<Datum> = serde_json::from_str(r#"[1, 2.5, "2.5", true]"#).unwrap();
        assert_eq!(
            xs,
            vec![
                Datum::Int(1),
                Datum::Float(2.5),
                Datum::Text("2.5".to_string()),
                Datum::Bool(true),
            ]
        );
    }

    #[test]
    fn structured_payloads_are_accepted() {
        let xs: Vec<Datum> =
            serde_json::from_str(r#"[null, [6, 18], {"on": true, "level": 0.5}]"#).unwrap();
        assert_eq!(xs[0], Datum::Null);
        assert_eq!(xs[1], Datum::from(vec![Datum::Int(6), Datum::Int(18)]));
        let Datum::Map(map) = &xs[2] else {
            panic!("expected a map, got {:?}", xs[2]);
        };
        assert_eq!(map["on"], Datum::Bool(true));
        assert_eq!(map["level"], Datum::Float(0.5));
    }

    #[test]
    fn structured_display() {
        let d: Datum = serde_json::from_str(r#"{"b": [1, "x"], "a": null}"#).unwrap();
        assert_eq!(d.to_string(), "{a: null, b: [1, x]}");
    }

    #[test]
    fn text_and_number_are_distinct() {
        assert_ne!(Datum::from("2.5"), Datum::from(2.5));
        assert_ne!(Datum::from(1_i64), Datum::from(1.0));
    }

    #[test]
    fn parse_from_command_line_text() {
        assert_eq!("0".parse::<Datum>().unwrap(), Datum::Int(0));
        assert_eq!("2.25".parse::<Datum>().unwrap(), Datum::Float(2.25));
        assert_eq!("false".parse::<Datum>().unwrap(), Datum::Bool(false));
        assert_eq!("night".parse::<Datum>().unwrap(), Datum::from("night"));
    }

    #[test]
    fn numeric_view() {
        assert_eq!(Datum::Int(2).as_f64(), Some(2.0));
        assert_eq!(Datum::from("2").as_f64(), None);
        assert_eq!(Datum::from("day").as_str(), Some("day"));
    }
}

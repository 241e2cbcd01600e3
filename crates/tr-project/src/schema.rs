//! Config file schema definitions.
//!
//! The schema is deliberately loose: type tags, names and trigger
//! parameters are optional at this level so that one malformed entry can be
//! reported and skipped by whoever builds values from it, instead of failing
//! the whole document.

use serde::{Deserialize, Serialize};
use tr_values::Datum;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConfigDef {
    #[serde(default)]
    pub values: Vec<ValueDef>,
    #[serde(default)]
    pub controls: Vec<ControlDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ValueDef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Variable default, or constant payload. `None` only when the key is
    /// absent; an explicit `null` is `Some(Datum::Null)`.
    #[serde(
        default,
        alias = "value",
        deserialize_with = "tr_values::datum::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Datum>,
    /// Advisory indicator re-read interval in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerDef>,
}

/// Value class derived from a free-form type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueClass {
    Variable,
    Constant,
    Indicator,
    Unknown(String),
}

/// Trigger class derived from a free-form type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerClass {
    Time,
    Gpio,
    Unknown(String),
}

fn normalize_tag(tag: Option<&str>) -> String {
    tag.unwrap_or_default().trim().to_lowercase()
}

/// Classify a value type tag: trimmed, lowercased, then matched by
/// substring so that `"Variable"` and `"variable "` both work.
pub fn classify_value_type(tag: Option<&str>) -> ValueClass {
    let tag = normalize_tag(tag);
    if tag.contains("var") {
        ValueClass::Variable
    } else if tag.contains("const") {
        ValueClass::Constant
    } else if tag.contains("ind") {
        ValueClass::Indicator
    } else {
        ValueClass::Unknown(tag)
    }
}

/// Classify a trigger type tag the same way as value tags.
pub fn classify_trigger_type(tag: Option<&str>) -> TriggerClass {
    let tag = normalize_tag(tag);
    if tag.contains("tim") {
        TriggerClass::Time
    } else if tag.contains("gpio") {
        TriggerClass::Gpio
    } else {
        TriggerClass::Unknown(tag)
    }
}

impl ValueDef {
    pub fn class(&self) -> ValueClass {
        classify_value_type(self.kind.as_deref())
    }
}

/// Indicator trigger; parameters depend on the trigger type and are parsed
/// on demand with [`TriggerDef::time`] or [`TriggerDef::gpio`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TriggerDef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl TriggerDef {
    pub fn class(&self) -> TriggerClass {
        classify_trigger_type(self.kind.as_deref())
    }

    pub fn time(&self) -> Result<TimeTriggerDef, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(self.params.clone()))
    }

    pub fn gpio(&self) -> Result<GpioTriggerDef, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(self.params.clone()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeTriggerDef {
    pub timeformat: String,
    #[serde(default)]
    pub ranges: Vec<TimeRangeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeRangeDef {
    pub a: String,
    pub b: String,
    pub value: Datum,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpioTriggerDef {
    pub pin: u32,
    pub samples: usize,
    /// Delay between samples in seconds.
    pub sample_dt: f64,
    #[serde(default)]
    pub ranges: Vec<GpioRangeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpioRangeDef {
    pub a: f64,
    pub b: f64,
    pub value: Datum,
}

/// Condition text paired with its action, in document order.
pub type ConditionPairs = Vec<(String, serde_json::Value)>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ControlDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<serde_json::Value>,
    #[serde(
        default,
        with = "ordered_pairs",
        skip_serializing_if = "Option::is_none"
    )]
    pub conditions: Option<ConditionPairs>,
}

/// Maps read as key/value pairs so that declaration order survives.
mod ordered_pairs {
    use core::fmt;

    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    use super::ConditionPairs;

    pub fn serialize<S>(pairs: &Option<ConditionPairs>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match pairs {
            Some(pairs) => serializer.collect_map(pairs.iter().map(|(k, v)| (k, v))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ConditionPairs>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PairsVisitor)
    }

    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Option<ConditionPairs>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of conditions to actions")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((condition, action)) = map.next_entry()? {
                pairs.push((condition, action));
            }
            Ok(Some(pairs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_tags_match_by_substring() {
        assert_eq!(classify_value_type(Some("Variable")), ValueClass::Variable);
        assert_eq!(classify_value_type(Some(" variable ")), ValueClass::Variable);
        assert_eq!(classify_value_type(Some("CONSTANT")), ValueClass::Constant);
        assert_eq!(classify_value_type(Some("indicator")), ValueClass::Indicator);
        assert_eq!(
            classify_value_type(Some("Bogus")),
            ValueClass::Unknown("bogus".to_string())
        );
        assert_eq!(
            classify_value_type(None),
            ValueClass::Unknown(String::new())
        );
    }

    #[test]
    fn trigger_tags_match_by_substring() {
        assert_eq!(classify_trigger_type(Some("Time")), TriggerClass::Time);
        assert_eq!(classify_trigger_type(Some("timer")), TriggerClass::Time);
        assert_eq!(classify_trigger_type(Some("GPIO")), TriggerClass::Gpio);
        assert!(matches!(
            classify_trigger_type(Some("i2c")),
            TriggerClass::Unknown(_)
        ));
    }

    #[test]
    fn conditions_keep_document_order() {
        let ctl: ControlDef = serde_json::from_str(
            r#"{"name": "c", "conditions": {"z": 1, "a": 2, "m": 3}}"#,
        )
        .unwrap();
        let keys: Vec<_> = ctl
            .conditions
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn null_conditions_are_absent() {
        let ctl: ControlDef =
            serde_json::from_str(r#"{"name": "c", "conditions": null}"#).unwrap();
        assert!(ctl.conditions.is_none());
    }

    #[test]
    fn trigger_params_parse_on_demand() {
        let v: ValueDef = serde_json::from_str(
            r#"{"type": "indicator", "name": "soil", "period": 60,
                "trigger": {"type": "gpio", "pin": 4, "samples": 3, "sample_dt": 0.1,
                            "ranges": [{"a": 0, "b": 0.5, "value": "wet"}]}}"#,
        )
        .unwrap();
        let trigger = v.trigger.unwrap();
        assert_eq!(trigger.class(), TriggerClass::Gpio);
        let gpio = trigger.gpio().unwrap();
        assert_eq!(gpio.pin, 4);
        assert_eq!(gpio.ranges[0].value, Datum::from("wet"));
        assert!(trigger.time().is_err());
    }

    #[test]
    fn null_default_is_present() {
        let v: ValueDef =
            serde_json::from_str(r#"{"type": "variable", "name": "mode", "default": null}"#)
                .unwrap();
        assert_eq!(v.default, Some(Datum::Null));

        let v: ValueDef = serde_json::from_str(r#"{"type": "variable", "name": "mode"}"#).unwrap();
        assert_eq!(v.default, None);
    }

    #[test]
    fn constant_payload_accepts_value_alias() {
        let v: ValueDef =
            serde_json::from_str(r#"{"type": "constant", "name": "pi", "value": "3.14"}"#)
                .unwrap();
        assert_eq!(v.default, Some(Datum::from("3.14")));
    }
}

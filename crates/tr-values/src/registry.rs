//! Name-keyed access to every configured value.

use std::collections::BTreeMap;

use crate::datum::Datum;
use crate::error::{ValueError, ValueResult};
use crate::value::Value;

/// Owns all values, keyed by name.
///
/// A registry is built once, from an iterator of values, and never gains or
/// loses entries afterwards. When two values share a name the later one
/// replaces the earlier one.
#[derive(Debug, Default)]
pub struct ValueRegistry {
    values: BTreeMap<String, Value>,
}

impl ValueRegistry {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Read the named value without knowing its kind.
    pub fn read(&mut self, name: &str) -> ValueResult<Datum> {
        self.entry(name)?.read()
    }

    /// Write the named value without knowing its kind.
    pub fn write(&mut self, name: &str, x: Datum) -> ValueResult<()> {
        self.entry(name)?.write(x)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.values()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn entry(&mut self, name: &str) -> ValueResult<&mut Value> {
        self.values.get_mut(name).ok_or_else(|| ValueError::NotFound {
            name: name.to_string(),
        })
    }
}

impl FromIterator<Value> for ValueRegistry {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|v| (v.name().to_string(), v))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Constant, ValueKind, Variable};

    fn registry() -> ValueRegistry {
        [
            Value::from(Constant::new("pi", Datum::Float(3.5))),
            Value::from(Variable::new("e", Datum::from("2"))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn read_and_write_by_name() {
        let mut values = registry();
        assert_eq!(values.read("pi"), Ok(Datum::Float(3.5)));
        assert_eq!(values.read("e"), Ok(Datum::from("2")));
        values.write("e", Datum::Float(2.25)).unwrap();
        assert_eq!(values.read("e"), Ok(Datum::Float(2.25)));
    }

    #[test]
    fn constant_write_through_registry_fails() {
        let mut values = registry();
        assert!(matches!(
            values.write("pi", Datum::Int(3)),
            Err(ValueError::Immutable { .. })
        ));
        assert_eq!(values.read("pi"), Ok(Datum::Float(3.5)));
    }

    #[test]
    fn unknown_name() {
        let mut values = registry();
        assert_eq!(
            values.read("nope"),
            Err(ValueError::NotFound {
                name: "nope".to_string()
            })
        );
        assert!(values.write("nope", Datum::Int(1)).is_err());
        assert!(values.get("nope").is_none());
    }

    #[test]
    fn later_duplicate_replaces_earlier() {
        let values: ValueRegistry = [
            Value::from(Variable::new("x", Datum::Int(1))),
            Value::from(Constant::new("x", Datum::Int(2))),
        ]
        .into_iter()
        .collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("x").map(Value::kind), Some(ValueKind::Constant));
    }

    #[test]
    fn names_are_sorted() {
        let values = registry();
        assert_eq!(values.names().collect::<Vec<_>>(), vec!["e", "pi"]);
        assert!(!values.is_empty());
        assert!(values.contains("pi"));
    }
}

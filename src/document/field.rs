//! Typed view on a single Dataverse field record
//!
//! A field record looks like
//! `{"typeName": "...", "multiple": bool, "typeClass": "...", "value": ...}`.
//! The view borrows the record stored in the document, so every write lands
//! in the document itself.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RefineResult;

/// Value class of a field, as reported in `typeClass`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeClass {
    Primitive,
    Compound,
    ControlledVocabulary,
}

impl TypeClass {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "primitive" => Some(TypeClass::Primitive),
            "compound" => Some(TypeClass::Compound),
            "controlledVocabulary" => Some(TypeClass::ControlledVocabulary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeClass::Primitive => "primitive",
            TypeClass::Compound => "compound",
            TypeClass::ControlledVocabulary => "controlledVocabulary",
        }
    }
}

/// Shapes a field `value` can take.
///
/// Older exports store keywords and topics as plain string lists while newer
/// ones use compound entries; both are explicit variants here.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Scalar primitive or vocabulary value
    Single(String),
    /// List of primitive or vocabulary values
    Multiple(Vec<String>),
    /// Compound entries keyed by sub-field type name
    Compound(Vec<Map<String, Value>>),
    /// Anything else, passed through untouched
    Other(Value),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Single(text),
            Value::Array(items) if items.iter().all(Value::is_string) => FieldValue::Multiple(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Array(items) if items.iter().all(Value::is_object) => FieldValue::Compound(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(entry) => Some(entry),
                        _ => None,
                    })
                    .collect(),
            ),
            other => FieldValue::Other(other),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Single(text) => Value::String(text),
            FieldValue::Multiple(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            FieldValue::Compound(entries) => {
                Value::Array(entries.into_iter().map(Value::Object).collect())
            }
            FieldValue::Other(other) => other,
        }
    }
}

/// Owned field record, used when a pipeline adds a field that was missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub type_name: String,
    pub multiple: bool,
    pub type_class: TypeClass,
    pub value: Value,
}

impl FieldRecord {
    /// Single-valued primitive field
    pub fn primitive(type_name: &str, value: impl Into<Value>) -> Self {
        Self {
            type_name: type_name.to_string(),
            multiple: false,
            type_class: TypeClass::Primitive,
            value: value.into(),
        }
    }

    /// Multi-valued compound field holding the given entries
    pub fn compound(type_name: &str, entries: Vec<Map<String, Value>>) -> Self {
        Self {
            type_name: type_name.to_string(),
            multiple: true,
            type_class: TypeClass::Compound,
            value: FieldValue::Compound(entries).into(),
        }
    }
}

impl From<FieldRecord> for Value {
    fn from(record: FieldRecord) -> Self {
        let mut map = Map::new();
        map.insert("typeName".to_string(), Value::String(record.type_name));
        map.insert("multiple".to_string(), Value::Bool(record.multiple));
        map.insert(
            "typeClass".to_string(),
            Value::String(record.type_class.as_str().to_string()),
        );
        map.insert("value".to_string(), record.value);
        Value::Object(map)
    }
}

/// Mutable view on a field record stored inside a document
#[derive(Debug)]
pub struct Field<'a> {
    record: &'a mut Map<String, Value>,
}

impl<'a> Field<'a> {
    pub fn new(record: &'a mut Map<String, Value>) -> Self {
        Self { record }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.record.get("typeName").and_then(Value::as_str)
    }

    pub fn type_class(&self) -> Option<TypeClass> {
        self.record
            .get("typeClass")
            .and_then(Value::as_str)
            .and_then(TypeClass::parse)
    }

    /// The `multiple` flag, `None` when the record does not carry one
    pub fn multiple(&self) -> Option<bool> {
        self.record.get("multiple").and_then(Value::as_bool)
    }

    pub fn value(&self) -> Option<&Value> {
        self.record.get("value")
    }

    pub fn value_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.record.insert("value".to_string(), value.into());
    }

    /// Takes the value out of the record, leaving `null` in its slot.
    pub fn take_value(&mut self) -> Option<FieldValue> {
        self.record
            .get_mut("value")
            .map(|slot| FieldValue::from(std::mem::take(slot)))
    }

    /// Rewrites the value through `f`. Records without a value are left alone.
    /// If `f` fails the slot is left `null`.
    pub fn map_value<F>(&mut self, f: F) -> RefineResult<()>
    where
        F: FnOnce(FieldValue) -> RefineResult<FieldValue>,
    {
        if let Some(value) = self.take_value() {
            let refined = f(value)?;
            self.set_value(refined);
        }
        Ok(())
    }

    /// Applies `f` to the scalar value or to every entry of a value list.
    /// Compound and other shapes are left untouched.
    pub fn map_text<F>(&mut self, mut f: F) -> RefineResult<()>
    where
        F: FnMut(&str) -> RefineResult<String>,
    {
        self.map_value(|value| match value {
            FieldValue::Single(text) => Ok(FieldValue::Single(f(text.as_str())?)),
            FieldValue::Multiple(items) => items
                .iter()
                .map(|item| f(item.as_str()))
                .collect::<RefineResult<Vec<_>>>()
                .map(FieldValue::Multiple),
            other => Ok(other),
        })
    }

    /// Turns a single-valued field into a multi-valued one.
    ///
    /// Only records that explicitly say `"multiple": false` are promoted; the
    /// flag and the value are changed together. Returns whether anything
    /// changed.
    pub fn promote_to_multiple(&mut self) -> bool {
        if self.multiple() != Some(false) {
            return false;
        }
        let values = match self.record.get_mut("value").map(std::mem::take) {
            Some(value) => vec![value],
            None => Vec::new(),
        };
        self.record.insert("multiple".to_string(), Value::Bool(true));
        self.record.insert("value".to_string(), Value::Array(values));
        true
    }

    pub fn record_mut(&mut self) -> &mut Map<String, Value> {
        &mut *self.record
    }
}

//! Native values: the output of coercion and the input to targets.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A coerced native value.
///
/// Mirrors the JSON value shapes, with two domain variants added:
/// [`Struct`](Self::Struct) for reconstructed structured-type instances and
/// [`Enum`](Self::Enum) for resolved enumeration members.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// Absent or null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String.
    Str(String),
    /// Sequence of coerced items.
    Array(Vec<NativeValue>),
    /// String-keyed mapping of coerced values.
    Map(IndexMap<String, NativeValue>),
    /// An instance of a declared structured type.
    Struct(StructValue),
    /// A resolved member of a declared enumeration.
    Enum(EnumValue),
}

/// An instance of a declared structured type: every declared field is
/// present, coerced in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    /// Name of the structured type.
    pub type_name: String,
    /// Field values in declaration order.
    pub fields: IndexMap<String, NativeValue>,
}

/// A resolved enumeration member.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// Name of the enumeration type.
    pub type_name: String,
    /// Native member identifier.
    pub member: String,
    /// The literal wire value of the member.
    pub value: Value,
}

impl NativeValue {
    /// Returns the boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns this value as a float. Integers widen.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns whether this value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Encodes this value as JSON.
    ///
    /// Structured instances encode as their field object; enumeration
    /// members encode as their literal wire value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::from(*n),
            Self::Float(n) => Value::from(*n),
            Self::Str(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(NativeValue::to_json).collect()),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Struct(instance) => Value::Object(
                instance
                    .fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Enum(member) => member.value.clone(),
        }
    }
}

impl From<bool> for NativeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for NativeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for NativeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for NativeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(items: Vec<NativeValue>) -> Self {
        Self::Array(items)
    }
}

impl From<Value> for NativeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::Array(items.into_iter().map(NativeValue::from).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(name, value)| (name, NativeValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Errors reading typed values out of [`Arguments`].
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// The named argument is not present.
    #[error("missing argument: {0}")]
    Missing(String),

    /// The argument could not be deserialized into the requested type.
    #[error("argument '{name}' has an unexpected shape: {source}")]
    Shape {
        /// Argument name.
        name: String,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Coerced arguments for one invocation, bound by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<String, NativeValue>,
}

impl Arguments {
    /// Creates arguments from a name-to-value map.
    #[must_use]
    pub fn new(values: IndexMap<String, NativeValue>) -> Self {
        Self { values }
    }

    /// Returns the raw value of an argument.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NativeValue> {
        self.values.get(name)
    }

    /// Deserializes a required argument by name.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when absent and
    /// [`ArgumentError::Shape`] when the value does not deserialize as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, ArgumentError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ArgumentError::Missing(name.to_string()))?;

        serde_json::from_value(value.to_json()).map_err(|source| ArgumentError::Shape {
            name: name.to_string(),
            source,
        })
    }

    /// Deserializes an optional argument by name. Returns `None` when the
    /// argument is missing or null.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Shape`] when a present, non-null value does
    /// not deserialize as `T`.
    pub fn get_optional_as<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, ArgumentError> {
        match self.values.get(name) {
            None | Some(NativeValue::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.to_json())
                .map(Some)
                .map_err(|source| ArgumentError::Shape {
                    name: name.to_string(),
                    source,
                }),
        }
    }

    /// Iterates over arguments in parameter declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NativeValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of bound arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn struct_encodes_as_field_object() {
        let value = NativeValue::Struct(StructValue {
            type_name: "Point".to_string(),
            fields: IndexMap::from([
                ("x".to_string(), NativeValue::Float(1.0)),
                ("y".to_string(), NativeValue::Float(2.0)),
            ]),
        });
        assert_eq!(value.to_json(), json!({"x": 1.0, "y": 2.0}));
    }

    #[test]
    fn enum_encodes_as_literal() {
        let value = NativeValue::Enum(EnumValue {
            type_name: "Color".to_string(),
            member: "Red".to_string(),
            value: json!("red"),
        });
        assert_eq!(value.to_json(), json!("red"));
    }

    #[test]
    fn typed_getters() {
        let args = Arguments::new(IndexMap::from([
            ("x".to_string(), NativeValue::Float(1.5)),
            ("tag".to_string(), NativeValue::Null),
        ]));
        let x: f64 = args.get_as("x").unwrap();
        assert_eq!(x, 1.5);
        assert!(args.get_optional_as::<String>("tag").unwrap().is_none());
        assert!(args.get_as::<f64>("missing").is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Untyped input as it arrives from JSON text or an unvalidated caller.
///
/// `List` is a variable-length sequence, `Pair` a fixed two-element tuple.
/// The distinction matters: coordinates only accept a `Pair`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Pair(Box<Value>, Box<Value>),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl Value {
    /// Runtime type name reported in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Pair(..) => "tuple",
            Value::Object(_) => "object",
        }
    }

    /// Numeric view of `Int` and `Float`. Booleans are not numbers here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn pair(first: impl Into<Value>, second: impl Into<Value>) -> Self {
        Value::Pair(Box::new(first.into()), Box::new(second.into()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(map),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((first, second): (A, B)) -> Self {
        Value::pair(first, second)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn to_radians(self) -> RadianCoordinate {
        RadianCoordinate {
            latitude: self.latitude.to_radians(),
            longitude: self.longitude.to_radians(),
        }
    }
}

impl From<Coordinate> for Value {
    fn from(coordinate: Coordinate) -> Self {
        Value::pair(coordinate.latitude, coordinate.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadianCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One line of the customer file after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub user_id: i64,
    pub name: String,
    pub location: Coordinate,
}

/// Invited customers keyed by `user_id`, iterated in ascending id order.
pub type GuestList = BTreeMap<i64, String>;

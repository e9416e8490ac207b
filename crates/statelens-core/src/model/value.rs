//! Live value graph
//!
//! `Value` mirrors what a host runtime hands us for a node's state or props:
//! primitives, callables, and shared containers that may reference each other
//! (including themselves). Containers are reference counted with interior
//! mutability so that such graphs can be assembled; their allocation address
//! is the identity token used by every seen-set.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Key marking a function value in JSON fixtures: `{"$fn": "onClick"}`
pub const FUNCTION_MARKER: &str = "$fn";

/// Stable identity token of a live container or node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    /// Identity of a reference-counted allocation
    pub fn of<T>(rc: &Rc<T>) -> Self {
        Identity(Rc::as_ptr(rc) as usize)
    }

    /// Identity supplied by an adapter with its own numbering
    pub fn from_raw(raw: usize) -> Self {
        Identity(raw)
    }

    pub fn raw(&self) -> usize {
        self.0
    }
}

/// Shared, mutable array
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    /// Copy of the current items (cheap: containers are shared, not cloned)
    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array#{:x}[{}]", self.identity().raw(), self.len())
    }
}

/// Shared, mutable object with sorted keys
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<BTreeMap<String, Value>>>);

impl ObjectRef {
    pub fn new(entries: BTreeMap<String, Value>) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(key.into(), value);
    }

    /// Copy of the current entries in key order
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object#{:x}{{{} keys}}", self.identity().raw(), self.len())
    }
}

/// A live value as read from the inspected runtime
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A callable; only its name is kept
    Function(String),
    Array(ArrayRef),
    Object(ObjectRef),
}

impl Value {
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(ObjectRef::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Array(ArrayRef::new(items.into_iter().collect()))
    }

    pub fn empty_object() -> Self {
        Value::Object(ObjectRef::default())
    }

    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(name.into())
    }

    /// Identity of the container, `None` for primitives and functions
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Array(a) => Some(a.identity()),
            Value::Object(o) => Some(o.identity()),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// `undefined` or `null`
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// JavaScript truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Function(_) | Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Member lookup on objects; `None` for anything else or a missing key
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(o) => o.get(key),
            _ => None,
        }
    }

    /// Build a value from JSON, honouring the `{"$fn": name}` function marker
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::array(items.iter().map(Value::from_json)),
            serde_json::Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(serde_json::Value::String(name)) = map.get(FUNCTION_MARKER) {
                        return Value::Function(name.clone());
                    }
                }
                Value::object(map.iter().map(|(k, v)| (k.clone(), Value::from_json(v))))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

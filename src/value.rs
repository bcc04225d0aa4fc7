//! Runtime values for variadic callables.
//!
//! Callables built by this crate receive and return [`Value`]s. Lists, tuples,
//! ranges, strings, maps and shared iterators are iterable and can therefore be
//! expanded by the flattener; numbers, booleans and `Nil` are not.

use std::{cell::RefCell, fmt, rc::Rc};

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::errors::VariadicError;

/// The elements of an iterable value, produced lazily.
///
/// Items are fallible because a shared iterator may itself be backed by a lazy
/// computation that fails part way through.
pub type Elements = Box<dyn Iterator<Item = Result<Value, VariadicError>>>;

/// Canonical runtime value passed to and returned from callables.
///
/// # Examples
///
/// ```rust
/// use variadic::value::Value;
/// let n = Value::Int(3);
/// assert_eq!(n.type_name(), "Int");
/// let s = Value::from("hello");
/// assert_eq!(s.type_name(), "String");
/// assert!(Value::default().is_nil());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Value {
    /// Absence of a value; default for uninitialized slots.
    #[default]
    Nil,
    Int(i64),
    /// Floating point number.
    Number(f64),
    String(String),
    Bool(bool),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Arithmetic progression of integers, expanded lazily.
    Range(RangeSpec),
    /// Map from string keys to values, iterated in key order.
    Map(OrdMap<String, Value>),
    /// One-shot iterator shared by every clone of the value.
    #[serde(skip)]
    Iter(SharedIter),
}

/// Tag naming each [`Value`] variant, used to classify values as atomic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum TypeTag {
    Nil,
    Int,
    Number,
    String,
    Bool,
    List,
    Tuple,
    Range,
    Map,
    Iter,
}

impl TypeTag {
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Nil => "Nil",
            TypeTag::Int => "Int",
            TypeTag::Number => "Number",
            TypeTag::String => "String",
            TypeTag::Bool => "Bool",
            TypeTag::List => "List",
            TypeTag::Tuple => "Tuple",
            TypeTag::Range => "Range",
            TypeTag::Map => "Map",
            TypeTag::Iter => "Iter",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RANGES
// ============================================================================

/// Half-open integer progression `start..stop` advancing by `step`.
///
/// A zero step, which [`RangeSpec::stepped`] refuses but deserialization can
/// still produce, yields no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl RangeSpec {
    pub fn new(start: i64, stop: i64) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// Returns `None` for a zero step, which would never terminate.
    pub fn stepped(start: i64, stop: i64, step: i64) -> Option<Self> {
        (step != 0).then_some(Self { start, stop, step })
    }

    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: self.start,
            stop: self.stop,
            step: self.step,
        }
    }
}

pub struct RangeIter {
    next: i64,
    stop: i64,
    step: i64,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let in_bounds = match self.step {
            0 => false,
            step if step > 0 => self.next < self.stop,
            _ => self.next > self.stop,
        };
        if !in_bounds {
            return None;
        }
        let current = self.next;
        self.next = self.next.saturating_add(self.step);
        if self.next == current {
            // Saturated at the integer bound; nothing further can follow.
            self.stop = current;
        }
        Some(current)
    }
}

// ============================================================================
// SHARED ITERATORS
// ============================================================================

/// A one-shot iterator behind a shared handle.
///
/// Cloning the handle does not restart iteration: every clone pulls from the
/// same underlying source, so each element is observed exactly once.
#[derive(Clone)]
pub struct SharedIter(Rc<RefCell<Elements>>);

impl SharedIter {
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Self::fallible(values.into_iter().map(Ok))
    }

    /// Wraps an iterator whose items may fail when pulled.
    pub fn fallible<I>(items: I) -> Self
    where
        I: Iterator<Item = Result<Value, VariadicError>> + 'static,
    {
        SharedIter(Rc::new(RefCell::new(Box::new(items))))
    }

    pub fn ptr_eq(&self, other: &SharedIter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Iterator for SharedIter {
    type Item = Result<Value, VariadicError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.borrow_mut().next()
    }
}

impl fmt::Debug for SharedIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedIter(..)")
    }
}

// ============================================================================
// VALUE API
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Iter(a), Value::Iter(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Nil => TypeTag::Nil,
            Value::Int(_) => TypeTag::Int,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Bool(_) => TypeTag::Bool,
            Value::List(_) => TypeTag::List,
            Value::Tuple(_) => TypeTag::Tuple,
            Value::Range(_) => TypeTag::Range,
            Value::Map(_) => TypeTag::Map,
            Value::Iter(_) => TypeTag::Iter,
        }
    }

    /// Returns the type name of the value as a string (for diagnostics).
    pub fn type_name(&self) -> &'static str {
        self.type_tag().name()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Wraps any iterator of values as a one-shot [`Value::Iter`].
    pub fn iter_from<I>(values: I) -> Value
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Value::Iter(SharedIter::new(values))
    }

    /// Consumes the value and yields its elements, one level deep.
    ///
    /// Non-iterable values fail immediately with
    /// [`VariadicError::NotIterable`]. Shared iterators are not restarted.
    pub fn into_elements(self) -> Result<Elements, VariadicError> {
        match self {
            Value::List(items) | Value::Tuple(items) => Ok(Box::new(items.into_iter().map(Ok))),
            Value::Range(range) => Ok(Box::new(range.iter().map(|n| Ok(Value::Int(n))))),
            Value::String(s) => {
                let chars: Vec<Value> = s.chars().map(|c| Value::String(c.to_string())).collect();
                Ok(Box::new(chars.into_iter().map(Ok)))
            }
            Value::Map(map) => {
                let keys: Vec<Value> = map.keys().cloned().map(Value::String).collect();
                Ok(Box::new(keys.into_iter().map(Ok)))
            }
            Value::Iter(shared) => Ok(Box::new(shared)),
            other => Err(VariadicError::NotIterable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Collects the elements of an iterable value, like `list(value)`.
    pub fn to_vec(self) -> Result<Vec<Value>, VariadicError> {
        self.into_elements()?.collect()
    }

    /// Converts to JSON. Ranges are expanded; shared iterators are not
    /// consumed and render as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Nil | Value::Iter(_) => Json::Null,
            Value::Int(n) => Json::from(*n),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Bool(b) => Json::Bool(*b),
            Value::List(items) | Value::Tuple(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Range(range) => Json::Array(range.iter().map(Json::from).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Display formatting helpers
    // ------------------------------------------------------------------------

    fn fmt_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }

    fn fmt_map(f: &mut fmt::Formatter<'_>, map: &OrdMap<String, Value>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                Value::fmt_items(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                Value::fmt_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Range(r) if r.step == 1 => write!(f, "range({}, {})", r.start, r.stop),
            Value::Range(r) => write!(f, "range({}, {}, {})", r.start, r.stop, r.step),
            Value::Map(map) => Value::fmt_map(f, map),
            Value::Iter(_) => write!(f, "<iter>"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<RangeSpec> for Value {
    fn from(range: RangeSpec) -> Self {
        Value::Range(range)
    }
}

impl From<SharedIter> for Value {
    fn from(iter: SharedIter) -> Self {
        Value::Iter(iter)
    }
}

/// Builds a [`Value::List`], converting each element with `Value::from`.
///
/// ```rust
/// use variadic::{list, value::Value};
/// assert_eq!(list![1, 2], Value::List(vec![Value::Int(1), Value::Int(2)]));
/// ```
#[macro_export]
macro_rules! list {
    ($($item:expr),* $(,)?) => {
        $crate::value::Value::List(vec![$($crate::value::Value::from($item)),*])
    };
}

/// Builds a [`Value::Tuple`], converting each element with `Value::from`.
#[macro_export]
macro_rules! tuple {
    ($($item:expr),* $(,)?) => {
        $crate::value::Value::Tuple(vec![$($crate::value::Value::from($item)),*])
    };
}

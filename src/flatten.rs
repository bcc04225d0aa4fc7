//! # Flattener
//!
//! Expands the raw values supplied to a variadic slot into one flat, lazy
//! sequence. Each raw value is either *atomic* (kept as a single element) or a
//! group whose elements are spliced in, one level deep, in order.
//!
//! ```rust
//! use std::rc::Rc;
//! use variadic::flatten::Flatten;
//! use variadic::value::{TypeTag, Value, RangeSpec};
//! use variadic::list;
//!
//! let raw = vec![Value::Int(1), list![2, 3], Value::Int(4), RangeSpec::new(5, 8).into()];
//! let flat = Flatten::new(Rc::new(TypeTag::Int), raw).into_values().unwrap();
//! assert_eq!(flat.len(), 7);
//! ```
//!
//! A group that turns out not to be iterable is only reported when iteration
//! reaches it; everything before it has already been produced.

use std::rc::Rc;

use crate::errors::VariadicError;
use crate::value::{Elements, TypeTag, Value};

/// Classifies a value as one flat element (`true`) or a group to expand (`false`).
pub trait AtomicType {
    fn is_atomic(&self, value: &Value) -> bool;

    /// Human-readable name of the classifier, for logs and diagnostics.
    fn describe(&self) -> String {
        "custom predicate".to_string()
    }
}

impl AtomicType for TypeTag {
    fn is_atomic(&self, value: &Value) -> bool {
        value.type_tag() == *self
    }

    fn describe(&self) -> String {
        self.name().to_string()
    }
}

/// Any of several tags, like an `isinstance` check against a tuple of types.
impl<const N: usize> AtomicType for [TypeTag; N] {
    fn is_atomic(&self, value: &Value) -> bool {
        self.contains(&value.type_tag())
    }

    fn describe(&self) -> String {
        describe_tags(self)
    }
}

impl AtomicType for Vec<TypeTag> {
    fn is_atomic(&self, value: &Value) -> bool {
        self.contains(&value.type_tag())
    }

    fn describe(&self) -> String {
        describe_tags(self)
    }
}

impl<F> AtomicType for F
where
    F: Fn(&Value) -> bool,
{
    fn is_atomic(&self, value: &Value) -> bool {
        self(value)
    }
}

fn describe_tags(tags: &[TypeTag]) -> String {
    let names: Vec<&str> = tags.iter().map(TypeTag::name).collect();
    names.join(" | ")
}

/// Lazy one-level flattening of raw variadic arguments.
pub struct Flatten {
    atomic: Rc<dyn AtomicType>,
    raw: std::vec::IntoIter<Value>,
    current: Option<Elements>,
}

impl Flatten {
    pub fn new(atomic: Rc<dyn AtomicType>, raw: Vec<Value>) -> Self {
        Self {
            atomic,
            raw: raw.into_iter(),
            current: None,
        }
    }

    /// Expands a single value as a group, whatever its type.
    ///
    /// This is how an unwrapped group parameter reads its argument: the value
    /// itself is iterated, and a non-iterable one fails on first use.
    pub fn group(value: Value) -> Self {
        Self::new(Rc::new(|_: &Value| false), vec![value])
    }

    /// Drains the sequence, stopping at the first failure.
    pub fn into_values(self) -> Result<Vec<Value>, VariadicError> {
        self.collect()
    }

    /// Turns the remaining sequence into a one-shot [`Value::Iter`].
    pub fn into_value(self) -> Value {
        Value::Iter(crate::value::SharedIter::fallible(self))
    }
}

impl Iterator for Flatten {
    type Item = Result<Value, VariadicError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(inner) = self.current.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.current = None;
            }

            let value = self.raw.next()?;
            if self.atomic.is_atomic(&value) {
                return Some(Ok(value));
            }
            log::trace!("expanding {} group", value.type_name());
            match value.into_elements() {
                Ok(elements) => self.current = Some(elements),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

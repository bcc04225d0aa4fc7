//! The `variadic(atomic)` decorator.
//!
//! [`variadic`] fixes the atomic predicate once; the returned [`Variadic`] can
//! then wrap any number of functions, one entry point per calling convention.
//!
//! ```rust
//! use variadic::{list, variadic, CallArgs, Callable, Function, TypeTag, Value};
//!
//! let f = variadic(TypeTag::Int)
//!     .group(Function::group("f", "xs", |xs| Ok(Value::List(xs.into_values()?))))
//!     .unwrap();
//! let out = f.call(CallArgs::new().arg(1).arg(2).arg(list![3, 4])).unwrap();
//! assert_eq!(out, list![1, 2, 3, 4]);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::errors::VariadicError;
use crate::flatten::{AtomicType, Flatten};
use crate::function::Function;
use crate::signature::Convention;
use crate::value::Value;
use crate::wrapper::{Wrapped, WrapperBuilder};

/// Binds an atomic predicate and returns a reusable decorator.
pub fn variadic<A>(atomic: A) -> Variadic
where
    A: AtomicType + 'static,
{
    Variadic {
        atomic: Rc::new(atomic),
    }
}

#[derive(Clone)]
pub struct Variadic {
    atomic: Rc<dyn AtomicType>,
}

impl Variadic {
    /// Flattens raw arguments with this decorator's predicate.
    pub fn flatten(&self, raw: Vec<Value>) -> Flatten {
        Flatten::new(Rc::clone(&self.atomic), raw)
    }

    pub fn describe(&self) -> String {
        self.atomic.describe()
    }

    /// Wraps `function` under an explicitly chosen convention.
    pub fn decorate(
        &self,
        convention: Convention,
        function: Function,
    ) -> Result<Wrapped, VariadicError> {
        WrapperBuilder::new(function, Rc::clone(&self.atomic))
            .convention(convention)
            .build()
    }

    /// Wraps `function` under the convention its shape declares.
    pub fn wrap(&self, function: Function) -> Result<Wrapped, VariadicError> {
        WrapperBuilder::new(function, Rc::clone(&self.atomic)).build()
    }

    /// `f(xs)`: the single parameter receives the flattened group.
    pub fn group(&self, function: Function) -> Result<Wrapped, VariadicError> {
        self.decorate(Convention::GROUP, function)
    }

    /// `f(self, xs)`
    pub fn method_group(&self, function: Function) -> Result<Wrapped, VariadicError> {
        self.decorate(Convention::METHOD_GROUP, function)
    }

    /// `f(a, b=default, *rest)`
    pub fn positional(&self, function: Function) -> Result<Wrapped, VariadicError> {
        self.decorate(Convention::VARIADIC, function)
    }

    /// `f(self, a, b=default, *rest)`
    pub fn method(&self, function: Function) -> Result<Wrapped, VariadicError> {
        self.decorate(Convention::METHOD, function)
    }

    /// `f(a, b=default, *rest, **keywords)`
    pub fn keywords(&self, function: Function) -> Result<Wrapped, VariadicError> {
        self.decorate(Convention::KEYWORDS, function)
    }

    /// `f(self, a, b=default, *rest, **keywords)`
    pub fn method_keywords(&self, function: Function) -> Result<Wrapped, VariadicError> {
        self.decorate(Convention::METHOD_KEYWORDS, function)
    }
}

impl fmt::Debug for Variadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variadic")
            .field("atomic", &self.atomic.describe())
            .finish()
    }
}

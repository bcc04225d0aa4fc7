//! # Signature-Preserving Wrapper Builder
//!
//! [`WrapperBuilder`] turns a [`Function`] into a [`Wrapped`] callable that
//! looks exactly like the original (same name, doc, parameters, defaults and
//! capture slots) but routes the values of its variadic slot through a
//! [`Flatten`] before the original body runs.
//!
//! The builder only knows the closed set of shapes named by [`Convention`].
//! The chosen convention is checked against the function's declared
//! [`ParamList`] when the wrapper is built, never when it is called.
//!
//! A call to a [`Wrapped`] then proceeds in three steps:
//!
//! 1. arguments are bound against the declared shape, failing exactly as a
//!    call to the original would;
//! 2. the values bound to the variadic slot are flattened;
//! 3. the original body runs with every other bound value untouched.
//!
//! Group functions receive their flattened values as a lazy
//! [`Value::Iter`](crate::value::Value::Iter), so a bad group element is only
//! reported once the body reaches it. Variadic functions receive a fully
//! expanded `rest`, as unpacking into a native variadic call would produce.

use std::fmt;
use std::rc::Rc;

use crate::binding::{bind, CallArgs};
use crate::errors::VariadicError;
use crate::flatten::{AtomicType, Flatten};
use crate::function::{CallResult, Callable, FnMeta, Function};
use crate::signature::{Convention, ParamList, Template};

/// Builds a [`Wrapped`] callable from a function and an atomic predicate.
pub struct WrapperBuilder {
    function: Function,
    atomic: Rc<dyn AtomicType>,
    convention: Option<Convention>,
}

impl WrapperBuilder {
    pub fn new(function: Function, atomic: Rc<dyn AtomicType>) -> Self {
        Self {
            function,
            atomic,
            convention: None,
        }
    }

    /// Selects the calling convention. Without one, it is inferred from the
    /// declared shape.
    pub fn convention(mut self, convention: Convention) -> Self {
        self.convention = Some(convention);
        self
    }

    pub fn build(self) -> Result<Wrapped, VariadicError> {
        let params = self.function.params();
        let convention = self
            .convention
            .unwrap_or_else(|| Convention::infer(params));
        params.validate(self.function.name(), convention)?;

        let call_shape = match convention.template {
            Template::Group => params.group_call_shape(),
            Template::Variadic | Template::VariadicKeywords => params.clone(),
        };

        let mut meta = FnMeta::default();
        meta.copy_from(self.function.meta());

        log::debug!(
            "wrapping {} as a {} function (atomic: {})",
            self.function.signature(),
            convention,
            self.atomic.describe()
        );

        Ok(Wrapped {
            meta,
            convention,
            call_shape,
            function: self.function,
            atomic: self.atomic,
        })
    }
}

/// A function whose variadic slot accepts nested groups of atomic values.
#[derive(Clone)]
pub struct Wrapped {
    meta: FnMeta,
    convention: Convention,
    /// Shape used to bind call arguments. Identical to the declared shape
    /// except for group functions, whose group parameter collects every
    /// positional argument.
    call_shape: ParamList,
    function: Function,
    atomic: Rc<dyn AtomicType>,
}

impl Wrapped {
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// The original, unwrapped function.
    pub fn wrapped(&self) -> &Function {
        &self.function
    }
}

impl Callable for Wrapped {
    fn meta(&self) -> &FnMeta {
        &self.meta
    }

    fn params(&self) -> &ParamList {
        self.function.params()
    }

    fn call(&self, args: CallArgs) -> CallResult {
        log::trace!(
            "calling {} with {} positional and {} keyword argument(s)",
            self.meta.name,
            args.positional.len(),
            args.keywords.len()
        );
        let mut bound = bind(&self.meta.name, &self.call_shape, args)?;
        let flat = Flatten::new(Rc::clone(&self.atomic), std::mem::take(&mut bound.rest));
        match self.convention.template {
            Template::Group => bound.positional.push(flat.into_value()),
            Template::Variadic | Template::VariadicKeywords => bound.rest = flat.into_values()?,
        }
        self.function.invoke(bound)
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("meta", &self.meta)
            .field("convention", &self.convention)
            .field("params", self.function.params())
            .field("atomic", &self.atomic.describe())
            .finish()
    }
}

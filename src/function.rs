//! Declared callables.
//!
//! A [`Function`] pairs a body with the [`ParamList`] it was declared with and
//! its [`FnMeta`] (name and documentation). Calling it binds arguments exactly
//! as the declared shape demands, then runs the body with the [`Bound`] result.
//!
//! Everything callable implements [`Callable`], which is also the
//! introspection surface: name, doc, parameter shape and rendered signature.

use std::fmt;
use std::rc::Rc;

use crate::binding::{bind, Bound, CallArgs};
use crate::errors::VariadicError;
use crate::flatten::Flatten;
use crate::signature::{ArgSpec, ParamList};
use crate::value::Value;

/// Convenient type alias for call results.
pub type CallResult = Result<Value, VariadicError>;

/// A function body: receives bound arguments, returns a value.
pub type Body = Rc<dyn Fn(Bound) -> CallResult>;

/// Display name and documentation of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FnMeta {
    pub name: String,
    pub doc: Option<String>,
}

impl FnMeta {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: None,
        }
    }

    /// Copies name and documentation from another callable's metadata.
    pub fn copy_from(&mut self, other: &FnMeta) {
        self.name.clone_from(&other.name);
        self.doc.clone_from(&other.doc);
    }
}

/// A function value with an explicitly declared parameter shape.
///
/// # Examples
///
/// ```rust
/// use variadic::binding::CallArgs;
/// use variadic::function::{Callable, Function};
/// use variadic::signature::ParamList;
/// use variadic::value::Value;
///
/// let f = Function::new("count", ParamList::new().rest("xs"), |b| {
///     Ok(Value::Int(b.rest.len() as i64))
/// });
/// assert_eq!(f.call(CallArgs::new().args([1, 2])).unwrap(), Value::Int(2));
/// assert_eq!(f.signature(), "count(*xs)");
/// ```
#[derive(Clone)]
pub struct Function {
    meta: FnMeta,
    params: ParamList,
    body: Body,
}

impl Function {
    pub fn new<F>(name: &str, params: ParamList, body: F) -> Self
    where
        F: Fn(Bound) -> CallResult + 'static,
    {
        Self {
            meta: FnMeta::new(name),
            params,
            body: Rc::new(body),
        }
    }

    /// A function of one parameter that reads its argument as a sequence.
    pub fn group<F>(name: &str, param: &str, body: F) -> Self
    where
        F: Fn(Flatten) -> CallResult + 'static,
    {
        Self::new(name, ParamList::new().param(param), move |mut bound: Bound| {
            let group = bound.positional.pop().unwrap_or_default();
            body(Flatten::group(group))
        })
    }

    /// A method whose only other parameter is read as a sequence.
    pub fn method_group<F>(name: &str, receiver: &str, param: &str, body: F) -> Self
    where
        F: Fn(Value, Flatten) -> CallResult + 'static,
    {
        let params = ParamList::new().receiver(receiver).param(param);
        Self::new(name, params, move |mut bound: Bound| {
            let group = bound.positional.pop().unwrap_or_default();
            body(bound.take(0), Flatten::group(group))
        })
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.meta.doc = Some(doc.to_string());
        self
    }

    /// Runs the body on already-bound arguments.
    pub(crate) fn invoke(&self, bound: Bound) -> CallResult {
        (self.body)(bound)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("meta", &self.meta)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Anything that can be called with [`CallArgs`] and introspected.
pub trait Callable {
    fn meta(&self) -> &FnMeta;

    fn params(&self) -> &ParamList;

    fn call(&self, args: CallArgs) -> CallResult;

    fn name(&self) -> &str {
        &self.meta().name
    }

    fn doc(&self) -> Option<&str> {
        self.meta().doc.as_deref()
    }

    fn arg_spec(&self) -> ArgSpec {
        self.params().arg_spec()
    }

    /// `name(params)`, e.g. `g(a, b=nil, *xs, **kw)`.
    fn signature(&self) -> String {
        format!("{}{}", self.name(), self.params().render())
    }

    /// Binds a receiver as the first positional argument.
    fn bind_to(&self, receiver: Value) -> BoundMethod<Self>
    where
        Self: Clone + Sized,
    {
        BoundMethod {
            params: self.params().without_receiver(),
            callable: self.clone(),
            receiver,
        }
    }
}

impl Callable for Function {
    fn meta(&self) -> &FnMeta {
        &self.meta
    }

    fn params(&self) -> &ParamList {
        &self.params
    }

    fn call(&self, args: CallArgs) -> CallResult {
        let bound = bind(&self.meta.name, &self.params, args)?;
        self.invoke(bound)
    }
}

/// A callable with its receiver already supplied.
#[derive(Debug, Clone)]
pub struct BoundMethod<C> {
    callable: C,
    receiver: Value,
    params: ParamList,
}

impl<C> BoundMethod<C> {
    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn function(&self) -> &C {
        &self.callable
    }
}

impl<C: Callable> Callable for BoundMethod<C> {
    fn meta(&self) -> &FnMeta {
        self.callable.meta()
    }

    fn params(&self) -> &ParamList {
        &self.params
    }

    fn call(&self, mut args: CallArgs) -> CallResult {
        args.positional.insert(0, self.receiver.clone());
        self.callable.call(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    #[test]
    fn group_functions_iterate_their_argument() {
        let f = Function::group("f", "xs", |xs| Ok(Value::List(xs.into_values()?)));
        let out = f.call(CallArgs::new().arg(list![1, 2])).unwrap();
        assert_eq!(out, list![1, 2]);

        let err = f.call(CallArgs::new().arg(1)).unwrap_err();
        assert_eq!(err.to_string(), "'Int' object is not iterable");

        let err = f.call(CallArgs::new().args([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "f() takes 1 positional argument but 2 were given");
    }

    #[test]
    fn bound_methods_hide_the_receiver() {
        let m = Function::method_group("tag", "self", "xs", |this, xs| {
            Ok(Value::Tuple(vec![this, Value::List(xs.into_values()?)]))
        });
        assert_eq!(m.signature(), "tag(self, xs)");

        let bound = m.bind_to(Value::from("obj"));
        assert_eq!(bound.signature(), "tag(xs)");
        assert_eq!(bound.receiver(), &Value::from("obj"));
        assert_eq!(bound.function().signature(), "tag(self, xs)");
        let out = bound.call(CallArgs::new().arg(list![1])).unwrap();
        assert_eq!(out, Value::Tuple(vec![Value::from("obj"), list![1]]));
    }

    #[test]
    fn metadata_copies_name_and_doc() {
        let source =
            Function::new("f", ParamList::new(), |_| Ok(Value::Nil)).with_doc("f's doc");
        assert_eq!(source.doc(), Some("f's doc"));

        let mut meta = FnMeta::new("wrapper");
        meta.copy_from(source.meta());
        assert_eq!(meta.name, "f");
        assert_eq!(meta.doc.as_deref(), Some("f's doc"));
    }
}

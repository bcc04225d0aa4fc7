//! # Variadic
//!
//! Signature-preserving wrappers that let a function taking a variadic list of
//! atomic values also accept nested groups of them (lists, tuples, ranges,
//! strings, maps, iterators), flattened one level before the function runs.
//!
//! ```rust
//! use variadic::{tuple, variadic, CallArgs, Callable, Function, ParamList, TypeTag, Value};
//!
//! let params = ParamList::new().param("a").optional("b", Value::Nil).rest("xs").keywords("kw");
//! let g = Function::new("g", params, |mut b| {
//!     Ok(Value::Tuple(vec![b.take(0), b.take(1), Value::Tuple(b.rest), b.keywords.into()]))
//! });
//! let g = variadic(TypeTag::Int).keywords(g).unwrap();
//!
//! assert_eq!(g.signature(), "g(a, b=nil, *xs, **kw)");
//! let out = g.call(CallArgs::new().arg(1).arg(2).arg(tuple![3, 4]).arg(5).kw("d", 6)).unwrap();
//! assert_eq!(out.to_string(), "(1, 2, (3, 4, 5), {d: 6})");
//! ```

pub mod binding;
pub mod cli;
pub mod decorator;
pub mod errors;
pub mod flatten;
pub mod function;
pub mod registry;
pub mod signature;
pub mod value;
pub mod wrapper;

pub use crate::binding::{Bound, CallArgs, Kwargs};
pub use crate::decorator::{variadic, Variadic};
pub use crate::errors::{ErrorCategory, VariadicError};
pub use crate::flatten::{AtomicType, Flatten};
pub use crate::function::{BoundMethod, CallResult, Callable, FnMeta, Function};
pub use crate::signature::{ArgSpec, Convention, ParamList, Template};
pub use crate::value::{RangeSpec, SharedIter, TypeTag, Value};
pub use crate::wrapper::{Wrapped, WrapperBuilder};

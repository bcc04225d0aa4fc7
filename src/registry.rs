//! # Function Registry
//!
//! A registry of named callables, inspectable at runtime, plus the standard
//! set of variadic functions the CLI exposes.
//!
//! Registry Invariant: every standard function is registered already wrapped,
//! so looking a name up always yields the flattening variant.

use std::rc::Rc;

use im::HashMap;

use crate::binding::Bound;
use crate::decorator::Variadic;
use crate::errors::VariadicError;
use crate::function::{CallResult, Callable, Function};
use crate::signature::ParamList;
use crate::value::Value;

// Registry for all callables, inspectable at runtime.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Rc<dyn Callable>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Rc<dyn Callable>> {
        self.functions.get(name)
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registers under the callable's own name, returning any callable it replaces.
    pub fn register(&mut self, callable: Rc<dyn Callable>) -> Option<Rc<dyn Callable>> {
        self.functions.insert(callable.name().to_string(), callable)
    }

    pub fn remove(&mut self, name: &str) -> Option<Rc<dyn Callable>> {
        self.functions.remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Registers the standard functions, each wrapped by `decorator`.
pub fn register_std_functions(
    registry: &mut FunctionRegistry,
    decorator: &Variadic,
) -> Result<(), VariadicError> {
    registry.register(Rc::new(decorator.group(collect())?));
    registry.register(Rc::new(decorator.positional(sum())?));
    registry.register(Rc::new(decorator.positional(join())?));
    registry.register(Rc::new(decorator.keywords(describe())?));
    Ok(())
}

/// Builds a registry holding the standard functions.
pub fn build_default_registry(decorator: &Variadic) -> Result<FunctionRegistry, VariadicError> {
    let mut registry = FunctionRegistry::new();
    register_std_functions(&mut registry, decorator)?;
    Ok(registry)
}

// ============================================================================
// STANDARD FUNCTIONS
// ============================================================================

fn collect() -> Function {
    Function::group("collect", "xs", |xs| Ok(Value::List(xs.into_values()?)))
        .with_doc("Collects every element into a list.")
}

fn sum() -> Function {
    Function::new("sum", ParamList::new().rest("xs"), |bound: Bound| add_all(&bound.rest))
        .with_doc("Adds the elements; integers stay integers unless a float is present.")
}

fn join() -> Function {
    let params = ParamList::new().optional("sep", ", ").rest("parts");
    Function::new("join", params, |bound: Bound| {
        let sep = bound.get(0).map(Value::to_string).unwrap_or_default();
        let parts: Vec<String> = bound.rest.iter().map(Value::to_string).collect();
        Ok(Value::String(parts.join(&sep)))
    })
    .with_doc("Joins the elements' text with `sep`.")
}

fn describe() -> Function {
    let params = ParamList::new()
        .param("a")
        .optional("b", Value::Nil)
        .rest("xs")
        .keywords("kw");
    Function::new("describe", params, |mut bound: Bound| {
        Ok(Value::Tuple(vec![
            bound.take(0),
            bound.take(1),
            Value::Tuple(bound.rest),
            bound.keywords.into(),
        ]))
    })
    .with_doc("Returns its bound arguments as `(a, b, xs, kw)`.")
}

fn add_all(values: &[Value]) -> CallResult {
    let mut int_total: i64 = 0;
    let mut float_total: Option<f64> = None;
    for value in values {
        match value {
            Value::Int(n) => match float_total.as_mut() {
                Some(total) => *total += *n as f64,
                None => {
                    int_total = int_total
                        .checked_add(*n)
                        .ok_or_else(|| VariadicError::raised("integer overflow in sum"))?;
                }
            },
            Value::Number(n) => {
                float_total = Some(float_total.unwrap_or(int_total as f64) + n);
            }
            other => {
                return Err(VariadicError::raised(format!(
                    "unsupported operand type for +: '{}'",
                    other.type_name()
                )))
            }
        }
    }
    Ok(float_total.map_or(Value::Int(int_total), Value::Number))
}

//! Argument binding.
//!
//! [`bind`] matches a call's positional and keyword arguments against a
//! declared [`ParamList`], the same way a native call with that parameter list
//! would: positional values fill parameters left to right, surplus values go to
//! the `*rest` slot, keywords fill named parameters or the `**keywords`
//! capture, and defaults fill whatever is left. Failures use native wording.

use im::OrdMap;

use crate::errors::VariadicError;
use crate::signature::ParamList;
use crate::value::Value;

/// Keyword arguments in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs(Vec<(String, Value)>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Captured keywords in call order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A [`Value::Map`] is keyed in sorted order, so converting loses the call
/// order. Read it from [`Kwargs::iter`] when it matters.
impl From<Kwargs> for Value {
    fn from(kwargs: Kwargs) -> Self {
        Value::Map(kwargs.0.into_iter().collect::<OrdMap<String, Value>>())
    }
}

impl FromIterator<(String, Value)> for Kwargs {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Kwargs(iter.into_iter().collect())
    }
}

/// The arguments of a single call, before binding.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keywords: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.positional.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn kw(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.keywords.push((name.to_string(), value.into()));
        self
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keywords: Vec::new(),
        }
    }
}

/// Arguments after binding: one value per declared positional parameter
/// (defaults applied), the `*rest` values, and the captured keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bound {
    pub positional: Vec<Value>,
    pub rest: Vec<Value>,
    pub keywords: Kwargs,
}

impl Bound {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Moves a positional value out, leaving `Nil` behind.
    pub fn take(&mut self, index: usize) -> Value {
        self.positional
            .get_mut(index)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Reads the last positional parameter as a group, like `list(xs)`.
    pub fn take_group(&mut self) -> Result<Vec<Value>, VariadicError> {
        self.positional.pop().unwrap_or_default().to_vec()
    }
}

/// Binds `args` against `params` for a call to `function`.
pub fn bind(function: &str, params: &ParamList, args: CallArgs) -> Result<Bound, VariadicError> {
    let CallArgs {
        positional,
        keywords,
    } = args;
    let declared = params.positional.len();
    let given = positional.len();

    let mut slots: Vec<Option<Value>> = vec![None; declared];
    let mut values = positional.into_iter();
    for slot in slots.iter_mut() {
        match values.next() {
            Some(value) => *slot = Some(value),
            None => break,
        }
    }
    let surplus: Vec<Value> = values.collect();

    let mut captured = Kwargs::new();
    for (name, value) in keywords {
        match params.position(&name) {
            Some(index) if slots[index].is_some() => {
                return Err(VariadicError::MultipleValues {
                    function: function.to_string(),
                    name,
                });
            }
            Some(index) => slots[index] = Some(value),
            None if params.keywords.is_some() => {
                if captured.contains(&name) {
                    return Err(VariadicError::MultipleValues {
                        function: function.to_string(),
                        name,
                    });
                }
                captured.insert(name, value);
            }
            None => {
                return Err(VariadicError::UnexpectedKeyword {
                    function: function.to_string(),
                    keyword: name,
                });
            }
        }
    }

    if !surplus.is_empty() && params.rest.is_none() {
        return Err(VariadicError::TooManyPositional {
            function: function.to_string(),
            min: params.required_count(),
            max: declared,
            given,
        });
    }

    let missing: Vec<String> = params
        .positional
        .iter()
        .zip(&slots)
        .filter(|(param, slot)| slot.is_none() && param.default.is_none())
        .map(|(param, _)| param.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(VariadicError::MissingArguments {
            function: function.to_string(),
            names: missing,
        });
    }

    let positional = params
        .positional
        .iter()
        .zip(slots)
        .map(|(param, slot)| slot.or_else(|| param.default.clone()).unwrap_or_default())
        .collect();

    Ok(Bound {
        positional,
        rest: surplus,
        keywords: captured,
    })
}

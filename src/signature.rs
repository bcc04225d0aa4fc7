//! Declared parameter shapes and calling-convention templates.
//!
//! A [`ParamList`] is the explicit description of a callable's interface:
//! ordered positional parameters (trailing ones may carry defaults), an
//! optional `*rest` slot, an optional `**keywords` capture, and whether the
//! first positional parameter is a method receiver. It is declared next to the
//! function body and never changes afterwards.
//!
//! A [`Convention`] names one of the fixed shapes the wrapper knows how to
//! reproduce. [`ParamList::validate`] checks a shape against a convention.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::VariadicError;
use crate::value::Value;

// ============================================================================
// PARAMETER SHAPES
// ============================================================================

/// One positional parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub default: Option<Value>,
}

/// A callable's declared parameters.
///
/// # Examples
///
/// ```rust
/// use variadic::signature::ParamList;
/// use variadic::value::Value;
///
/// let params = ParamList::new()
///     .param("a")
///     .optional("b", Value::Nil)
///     .rest("xs")
///     .keywords("kw");
/// assert_eq!(params.render(), "(a, b=nil, *xs, **kw)");
/// assert_eq!(params.required_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamList {
    pub positional: Vec<Param>,
    pub rest: Option<String>,
    pub keywords: Option<String>,
    /// The first positional parameter receives the method receiver.
    pub receiver: bool,
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a leading receiver parameter (conventionally `self`).
    pub fn receiver(mut self, name: &str) -> Self {
        self.positional.insert(
            0,
            Param {
                name: name.to_string(),
                default: None,
            },
        );
        self.receiver = true;
        self
    }

    /// Appends a required positional parameter.
    pub fn param(mut self, name: &str) -> Self {
        self.positional.push(Param {
            name: name.to_string(),
            default: None,
        });
        self
    }

    /// Appends a positional parameter with a default value.
    pub fn optional(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.positional.push(Param {
            name: name.to_string(),
            default: Some(default.into()),
        });
        self
    }

    pub fn rest(mut self, name: &str) -> Self {
        self.rest = Some(name.to_string());
        self
    }

    pub fn keywords(mut self, name: &str) -> Self {
        self.keywords = Some(name.to_string());
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.positional.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positional.iter().position(|p| p.name == name)
    }

    /// Number of leading positional parameters without a default.
    pub fn required_count(&self) -> usize {
        self.positional.len() - self.trailing_defaults().count()
    }

    /// Default values, aligned with the end of the positional parameters.
    pub fn defaults(&self) -> Vec<Value> {
        let mut defaults: Vec<Value> = self.trailing_defaults().cloned().collect();
        defaults.reverse();
        defaults
    }

    fn trailing_defaults(&self) -> impl Iterator<Item = &Value> {
        self.positional
            .iter()
            .rev()
            .map_while(|p| p.default.as_ref())
    }

    /// The introspection view of this shape.
    pub fn arg_spec(&self) -> ArgSpec {
        ArgSpec {
            args: self.names().into_iter().map(str::to_string).collect(),
            varargs: self.rest.clone(),
            varkw: self.keywords.clone(),
            defaults: self.defaults(),
        }
    }

    /// Renders the shape as a parameter list, e.g. `(a, b=nil, *xs, **kw)`.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = self
            .positional
            .iter()
            .map(|p| match &p.default {
                Some(default) => format!("{}={}", p.name, repr(default)),
                None => p.name.clone(),
            })
            .collect();
        if let Some(rest) = &self.rest {
            parts.push(format!("*{}", rest));
        }
        if let Some(keywords) = &self.keywords {
            parts.push(format!("**{}", keywords));
        }
        format!("({})", parts.join(", "))
    }

    /// The same shape with the receiver removed, as seen through a bound method.
    pub fn without_receiver(&self) -> ParamList {
        let mut params = self.clone();
        if !params.positional.is_empty() {
            params.positional.remove(0);
        }
        params.receiver = false;
        params
    }

    /// The shape a group function is called with: its receiver (if any)
    /// followed by a variadic slot named after the group parameter.
    pub(crate) fn group_call_shape(&self) -> ParamList {
        let mut positional = self.positional.clone();
        let group = positional.pop().map(|p| p.name);
        ParamList {
            positional,
            rest: group,
            keywords: None,
            receiver: self.receiver,
        }
    }

    /// Checks that this shape fits `convention`.
    pub fn validate(&self, function: &str, convention: Convention) -> Result<(), VariadicError> {
        let fail = |reason: String| Err(VariadicError::shape(function, convention, reason));

        let mut seen = HashSet::new();
        let all_names = self
            .positional
            .iter()
            .map(|p| &p.name)
            .chain(self.rest.iter())
            .chain(self.keywords.iter());
        for name in all_names {
            if name.is_empty() {
                return fail("parameter names must not be empty".to_string());
            }
            if !seen.insert(name.as_str()) {
                return fail(format!("duplicate parameter '{}'", name));
            }
        }

        let mut defaulted = false;
        for p in &self.positional {
            match (&p.default, defaulted) {
                (Some(_), _) => defaulted = true,
                (None, true) => {
                    return fail(format!(
                        "parameter '{}' without a default follows a parameter with one",
                        p.name
                    ))
                }
                (None, false) => {}
            }
        }

        if self.receiver != convention.receiver {
            return fail(if convention.receiver {
                "no receiver parameter declared".to_string()
            } else {
                "a receiver parameter needs a method convention".to_string()
            });
        }
        if convention.receiver {
            match self.positional.first() {
                None => return fail("no receiver parameter declared".to_string()),
                Some(p) if p.default.is_some() => {
                    return fail(format!("receiver '{}' cannot have a default", p.name))
                }
                Some(_) => {}
            }
        }

        let own = self.positional.len() - usize::from(convention.receiver);
        match convention.template {
            Template::Group => {
                if own != 1 {
                    return fail(format!(
                        "expected exactly one group parameter, found {}",
                        own
                    ));
                }
                if defaulted {
                    return fail("the group parameter cannot have a default".to_string());
                }
                if let Some(rest) = &self.rest {
                    return fail(format!("a group function cannot also declare *{}", rest));
                }
                if let Some(keywords) = &self.keywords {
                    return fail(format!("a group function cannot also declare **{}", keywords));
                }
            }
            Template::Variadic => {
                if self.rest.is_none() {
                    return fail("no *rest parameter to receive the flattened values".to_string());
                }
                if let Some(keywords) = &self.keywords {
                    return fail(format!(
                        "**{} needs the variadic keywords convention",
                        keywords
                    ));
                }
            }
            Template::VariadicKeywords => {
                if self.rest.is_none() {
                    return fail("no *rest parameter to receive the flattened values".to_string());
                }
                if self.keywords.is_none() {
                    return fail("no **keywords parameter declared".to_string());
                }
            }
        }
        Ok(())
    }
}

fn repr(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

/// Introspection result for a declared shape: names, defaults aligned from the
/// end, and the names of the capture slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub args: Vec<String>,
    pub varargs: Option<String>,
    pub varkw: Option<String>,
    pub defaults: Vec<Value>,
}

// ============================================================================
// CALLING CONVENTIONS
// ============================================================================

/// The supported parameter-list templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    /// A single parameter receives the whole flattened group: `f(xs)`.
    Group,
    /// Named parameters, optionally defaulted, then `*rest`.
    Variadic,
    /// As `Variadic`, followed by `**keywords`.
    VariadicKeywords,
}

/// A template together with whether the callable takes a leading receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Convention {
    pub template: Template,
    pub receiver: bool,
}

impl Convention {
    pub const GROUP: Convention = Convention::plain(Template::Group);
    pub const VARIADIC: Convention = Convention::plain(Template::Variadic);
    pub const KEYWORDS: Convention = Convention::plain(Template::VariadicKeywords);
    pub const METHOD_GROUP: Convention = Convention::method(Template::Group);
    pub const METHOD: Convention = Convention::method(Template::Variadic);
    pub const METHOD_KEYWORDS: Convention = Convention::method(Template::VariadicKeywords);

    pub const fn plain(template: Template) -> Self {
        Self {
            template,
            receiver: false,
        }
    }

    pub const fn method(template: Template) -> Self {
        Self {
            template,
            receiver: true,
        }
    }

    /// Picks the convention a shape most naturally declares.
    pub fn infer(params: &ParamList) -> Self {
        let template = match (&params.rest, &params.keywords) {
            (None, _) => Template::Group,
            (Some(_), None) => Template::Variadic,
            (Some(_), Some(_)) => Template::VariadicKeywords,
        };
        Self {
            template,
            receiver: params.receiver,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Group => write!(f, "group"),
            Template::Variadic => write!(f, "variadic"),
            Template::VariadicKeywords => write!(f, "variadic keywords"),
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.receiver {
            write!(f, "method {}", self.template)
        } else {
            write!(f, "{}", self.template)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;

    fn full() -> ParamList {
        ParamList::new()
            .param("a")
            .optional("b", Value::Nil)
            .rest("xs")
            .keywords("kw")
    }

    #[test]
    fn arg_spec_aligns_defaults_from_the_end() {
        let spec = ParamList::new()
            .param("a")
            .optional("b", 2)
            .optional("c", "x")
            .rest("xs")
            .arg_spec();
        assert_eq!(spec.args, vec!["a", "b", "c"]);
        assert_eq!(spec.defaults, vec![Value::Int(2), Value::from("x")]);
        assert_eq!(spec.varargs.as_deref(), Some("xs"));
        assert_eq!(spec.varkw, None);
    }

    #[test]
    fn render_shows_receiver_defaults_and_captures() {
        let params = ParamList::new().receiver("self").optional("sep", ",").rest("parts");
        assert_eq!(params.render(), "(self, sep=',', *parts)");
        assert_eq!(params.without_receiver().render(), "(sep=',', *parts)");
        assert_eq!(ParamList::new().render(), "()");
    }

    #[test]
    fn infer_picks_template_from_slots() {
        assert_eq!(Convention::infer(&ParamList::new().param("xs")), Convention::GROUP);
        assert_eq!(Convention::infer(&ParamList::new().rest("xs")), Convention::VARIADIC);
        assert_eq!(Convention::infer(&full()), Convention::KEYWORDS);
        assert_eq!(
            Convention::infer(&ParamList::new().receiver("self").param("xs")),
            Convention::METHOD_GROUP
        );
    }

    #[test]
    fn validate_accepts_each_template() {
        assert!(ParamList::new().param("xs").validate("f", Convention::GROUP).is_ok());
        assert!(ParamList::new().rest("xs").validate("f", Convention::VARIADIC).is_ok());
        assert!(full().validate("f", Convention::KEYWORDS).is_ok());
        assert!(ParamList::new()
            .receiver("self")
            .param("xs")
            .validate("f", Convention::METHOD_GROUP)
            .is_ok());
        assert!(ParamList::new()
            .receiver("self")
            .optional("a", 1)
            .rest("xs")
            .validate("f", Convention::METHOD)
            .is_ok());
    }

    #[test]
    fn validate_rejects_mismatched_shapes() {
        let two = ParamList::new().param("a").param("b");
        let err = two.validate("f", Convention::GROUP).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Shape);
        assert_eq!(
            err.to_string(),
            "f() cannot be made variadic as a group function: \
             expected exactly one group parameter, found 2"
        );

        assert!(two.validate("f", Convention::VARIADIC).is_err());
        assert!(full().validate("f", Convention::VARIADIC).is_err());
        assert!(ParamList::new().rest("xs").validate("f", Convention::KEYWORDS).is_err());
        assert!(ParamList::new()
            .optional("xs", list_default())
            .validate("f", Convention::GROUP)
            .is_err());
    }

    #[test]
    fn validate_rejects_bad_names_and_ordering() {
        let dup = ParamList::new().param("a").rest("a");
        let err = dup.validate("f", Convention::VARIADIC).unwrap_err();
        assert!(err.to_string().contains("duplicate parameter 'a'"));

        let order = ParamList::new().optional("a", 1).param("b").rest("xs");
        assert!(order.validate("f", Convention::VARIADIC).is_err());

        let no_receiver = ParamList::new().param("xs");
        assert!(no_receiver.validate("f", Convention::METHOD_GROUP).is_err());

        let stray_receiver = ParamList::new().receiver("self").rest("xs");
        assert!(stray_receiver.validate("f", Convention::VARIADIC).is_err());
    }

    fn list_default() -> Value {
        Value::List(vec![])
    }
}

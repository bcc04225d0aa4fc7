// Property tests: a wrapped call sees exactly the one-level expansion of its
// arguments, for any mix of atomic tags and nested groups.

use proptest::prelude::*;

use variadic::{
    variadic, Bound, CallArgs, Callable, Function, ParamList, TypeTag, Value, VariadicError,
};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,3}".prop_map(Value::String),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(inner, 0..4).prop_map(Value::Tuple),
        ]
    })
}

fn tags() -> impl Strategy<Value = Vec<TypeTag>> {
    prop::sample::subsequence(
        vec![
            TypeTag::Int,
            TypeTag::Bool,
            TypeTag::String,
            TypeTag::List,
            TypeTag::Tuple,
        ],
        0..=5,
    )
}

/// Reference expansion: atoms kept, groups spliced one level, the first
/// non-atomic scalar is an error.
fn expand(tags: &[TypeTag], raw: &[Value]) -> Result<Vec<Value>, VariadicError> {
    let mut out = Vec::new();
    for value in raw {
        if tags.contains(&value.type_tag()) {
            out.push(value.clone());
            continue;
        }
        match value {
            Value::List(items) | Value::Tuple(items) => out.extend(items.iter().cloned()),
            Value::String(s) => out.extend(s.chars().map(|c| Value::String(c.to_string()))),
            other => {
                return Err(VariadicError::NotIterable {
                    type_name: other.type_name(),
                })
            }
        }
    }
    Ok(out)
}

fn collect() -> Function {
    Function::group("collect", "xs", |xs| Ok(Value::List(xs.into_values()?)))
}

fn star_xs() -> Function {
    Function::new("f", ParamList::new().rest("xs"), |bound: Bound| {
        Ok(Value::Tuple(bound.rest))
    })
}

proptest! {
    /// Flattening agrees with the reference expansion, failures included.
    #[test]
    fn flatten_matches_one_level_expansion(
        tags in tags(),
        raw in prop::collection::vec(value(), 0..6)
    ) {
        let flat = variadic(tags.clone()).flatten(raw.clone()).into_values();
        prop_assert_eq!(flat, expand(&tags, &raw));
    }

    /// `wrap(f)(x1, ..., xn) == f(expanded)` for a group function.
    #[test]
    fn wrapped_group_call_equals_call_on_expansion(
        tags in tags(),
        raw in prop::collection::vec(value(), 0..6)
    ) {
        let wrapped = variadic(tags.clone()).group(collect()).unwrap();
        let through = wrapped.call(CallArgs::from(raw.clone()));
        match expand(&tags, &raw) {
            Ok(flat) => {
                let direct = collect().call(CallArgs::new().arg(Value::List(flat)));
                prop_assert_eq!(through, direct);
            }
            Err(err) => prop_assert_eq!(through, Err(err)),
        }
    }

    /// Variadic functions receive the same expansion in their rest slot.
    #[test]
    fn wrapped_rest_slot_holds_the_expansion(
        tags in tags(),
        raw in prop::collection::vec(value(), 0..6)
    ) {
        let wrapped = variadic(tags.clone()).positional(star_xs()).unwrap();
        let through = wrapped.call(CallArgs::from(raw.clone()));
        prop_assert_eq!(through, expand(&tags, &raw).map(Value::Tuple));
    }
}

// Flattening behavior through the public decorator API.

use std::cell::Cell;
use std::rc::Rc;

use variadic::{list, tuple, variadic, ErrorCategory, RangeSpec, SharedIter, TypeTag, Value};

fn ints(raw: Vec<Value>) -> Result<Vec<Value>, variadic::VariadicError> {
    variadic(TypeTag::Int).flatten(raw).into_values()
}

fn int_values(range: std::ops::Range<i64>) -> Vec<Value> {
    range.map(Value::Int).collect()
}

#[test]
fn atoms_pass_through_in_order() {
    assert!(ints(vec![]).unwrap().is_empty());
    assert_eq!(ints(vec![Value::Int(1)]).unwrap(), vec![Value::Int(1)]);
    assert_eq!(ints(int_values(1..5)).unwrap(), int_values(1..5));
}

#[test]
fn groups_are_spliced_one_level() {
    let flat = ints(vec![list![1, 2, 3], tuple![4, 5, 6]]).unwrap();
    assert_eq!(flat, int_values(1..7));

    let flat = ints(vec![
        Value::Int(1),
        list![2, 3],
        Value::Int(4),
        RangeSpec::new(5, 8).into(),
    ])
    .unwrap();
    assert_eq!(flat, int_values(1..8));
}

#[test]
fn nested_groups_stay_nested() {
    let flat = ints(vec![list![1, list![2, 3]]]).unwrap();
    assert_eq!(flat, vec![Value::Int(1), list![2, 3]]);
}

#[test]
fn empty_groups_contribute_nothing() {
    let flat = ints(vec![
        list![],
        Value::Int(1),
        tuple![],
        RangeSpec::new(3, 3).into(),
    ])
    .unwrap();
    assert_eq!(flat, vec![Value::Int(1)]);
}

#[test]
fn strings_expand_unless_atomic() {
    let raw = || vec![Value::from("ab"), list!["cd", "ef"]];

    let flat = variadic(TypeTag::String).flatten(raw()).into_values().unwrap();
    assert_eq!(flat, vec![Value::from("ab"), Value::from("cd"), Value::from("ef")]);

    let flat = variadic(TypeTag::Int).flatten(raw()).into_values().unwrap();
    assert_eq!(
        flat,
        vec![
            Value::from("a"),
            Value::from("b"),
            Value::from("cd"),
            Value::from("ef")
        ]
    );
}

#[test]
fn several_atomic_tags_are_accepted() {
    let decorator = variadic([TypeTag::Int, TypeTag::String]);
    assert_eq!(decorator.describe(), "Int | String");
    let flat = decorator
        .flatten(vec![Value::from("ab"), Value::Int(1), list![2, "c"]])
        .into_values()
        .unwrap();
    assert_eq!(
        flat,
        vec![Value::from("ab"), Value::Int(1), Value::Int(2), Value::from("c")]
    );
}

#[test]
fn custom_predicates_classify_values() {
    let even = variadic(|v: &Value| v.as_int().is_some_and(|n| n % 2 == 0));
    assert_eq!(even.describe(), "custom predicate");
    let flat = even
        .flatten(vec![Value::Int(2), list![1, 3], Value::Int(4)])
        .into_values()
        .unwrap();
    assert_eq!(flat, vec![Value::Int(2), Value::Int(1), Value::Int(3), Value::Int(4)]);
}

#[test]
fn non_iterable_group_fails_only_when_reached() {
    let mut flat = variadic(TypeTag::Int).flatten(vec![
        Value::Int(1),
        list![2],
        Value::Bool(true),
        Value::Int(9),
    ]);

    assert_eq!(flat.next().unwrap().unwrap(), Value::Int(1));
    assert_eq!(flat.next().unwrap().unwrap(), Value::Int(2));
    let err = flat.next().unwrap().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotIterable);
    assert_eq!(err.to_string(), "'Bool' object is not iterable");
}

#[test]
fn iterator_arguments_are_pulled_lazily() {
    let pulled = Rc::new(Cell::new(0));
    let source = {
        let pulled = Rc::clone(&pulled);
        Value::iter_from((1..=3).map(move |n| {
            pulled.set(pulled.get() + 1);
            Value::Int(n)
        }))
    };

    let mut flat = variadic(TypeTag::Int).flatten(vec![source, Value::Nil]);
    assert_eq!(pulled.get(), 0);

    assert_eq!(flat.next().unwrap().unwrap(), Value::Int(1));
    assert_eq!(pulled.get(), 1);

    assert_eq!(flat.next().unwrap().unwrap(), Value::Int(2));
    assert_eq!(flat.next().unwrap().unwrap(), Value::Int(3));
    assert_eq!(pulled.get(), 3);

    let err = flat.next().unwrap().unwrap_err();
    assert_eq!(err.to_string(), "'Nil' object is not iterable");
}

#[test]
fn shared_iterators_are_one_shot() {
    let shared = SharedIter::new(int_values(0..3));
    let first = ints(vec![Value::Iter(shared.clone())]).unwrap();
    assert_eq!(first, int_values(0..3));

    let second = ints(vec![Value::Iter(shared)]).unwrap();
    assert!(second.is_empty());
}

#[test]
fn failures_inside_iterators_propagate() {
    let source = SharedIter::fallible(
        vec![
            Ok(Value::Int(1)),
            Err(variadic::VariadicError::raised("source exhausted")),
        ]
        .into_iter(),
    );
    let err = ints(vec![Value::Iter(source)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Raised);
    assert_eq!(err.to_string(), "source exhausted");
}

#[test]
fn maps_expand_to_their_keys() {
    let map = Value::from(serde_json::json!({"b": 2, "a": 1}));
    assert_eq!(ints(vec![map]).unwrap(), vec![Value::from("a"), Value::from("b")]);
}

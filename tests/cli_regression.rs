// Regression tests for the command-line interface.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn cli() -> Command {
    Command::cargo_bin("variadic").unwrap()
}

#[test]
fn flatten_splices_lists_and_ranges() {
    cli()
        .args(["flatten", "1", "[2, 3]", "4", "range(5, 8)"])
        .assert()
        .success()
        .stdout("[1, 2, 3, 4, 5, 6, 7]\n");
}

#[test]
fn flatten_prints_json() {
    cli()
        .args(["flatten", "--json", "[1, 2]", "3"])
        .assert()
        .success()
        .stdout("[1,2,3]\n");
}

#[test]
fn flatten_keeps_atomic_strings_whole() {
    cli()
        .args(["flatten", "-a", "string", "ab", "[\"cd\"]"])
        .assert()
        .success()
        .stdout("[ab, cd]\n");
}

#[test]
fn call_passes_keywords_through() {
    cli()
        .args(["call", "describe", "--kw", "d=6", "1", "2", "[3, 4]", "5"])
        .assert()
        .success()
        .stdout("(1, 2, (3, 4, 5), {d: 6})\n");
}

#[test]
fn call_sums_nested_groups() {
    cli()
        .args(["call", "sum", "1", "[2, 3]", "range(4, 6)"])
        .assert()
        .success()
        .stdout("15\n");
}

#[test]
fn list_shows_signatures() {
    cli()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("describe(a, b=nil, *xs, **kw)").and(contains("collect(xs)")));
}

#[test]
fn signature_shows_one_function() {
    cli()
        .args(["signature", "join"])
        .assert()
        .success()
        .stdout(contains("join(sep=', ', *parts)"));
}

#[test]
fn unknown_function_is_a_diagnostic() {
    cli()
        .args(["call", "nope"])
        .assert()
        .failure()
        .stderr(contains("unknown function 'nope'"));
}

#[test]
fn unexpected_keyword_is_reported() {
    cli()
        .args(["call", "sum", "--kw", "z=1", "1"])
        .assert()
        .failure()
        .stderr(contains("unexpected keyword argument 'z'").and(contains("variadic::binding")));
}

#[test]
fn non_iterable_arguments_fail() {
    cli()
        .args(["flatten", "1", "true"])
        .assert()
        .failure()
        .stderr(contains("'Bool' object is not iterable"));
}

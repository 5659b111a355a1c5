use std::{fs, path::Path};

use inferra::{get_result, interpreter::value::core::Value};
use walkdir::WalkDir;

fn run(source: &str) -> Result<String, Box<dyn std::error::Error>> {
    get_result(source, Path::new("inline.inferra"))
}

fn run_file(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    get_result(&content, Path::new(path))
}

fn assert_report(source: &str, expected: &str) {
    match run(source) {
        Ok(report) => assert_eq!(report, expected, "for script:\n{source}"),
        Err(e) => panic!("Script failed: {e}\n{source}"),
    }
}

fn assert_report_contains(source: &str, fragment: &str) {
    match run(source) {
        Ok(report) => {
            assert!(report.contains(fragment),
                    "Expected '{fragment}' in report:\n{report}\nScript:\n{source}");
        },
        Err(e) => panic!("Script failed: {e}\n{source}"),
    }
}

fn assert_rejected(source: &str) {
    if run(source).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{source}")
    }
}

#[test]
fn fixture_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").max_depth(1)
                                      .into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "inferra")
                                      })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = get_result(&content, path) {
            panic!("Fixture program {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No fixture programs found in tests/programs");
}

#[test]
fn example_works() {
    let report = run_file("tests/example.inferra").expect("example script failed");
    assert_eq!(report,
               "0> 13\n1> 3\n2> 1\n3> 0\n4> 7\n5> [8, 9]\n6> \"hello\"");
}

#[test]
fn literals_and_normalization() {
    assert_report("5", "0> 5");
    assert_report("_", "0> _");
    assert_report("[]", "0> 0");
    assert_report("[_, _, _]", "0> 3");
    assert_report("[1, _]", "0> [1, _]");
    assert_report("[[_, _], 2]", "0> [2, 2]");
}

#[test]
fn normalization_is_idempotent() {
    let value = Value::Sequence(vec![Value::Sequence(vec![Value::Unit, Value::Unit]),
                                     Value::Count(2),
                                     Value::Unit,]);
    let once = value.normalize();
    assert_eq!(once.clone().normalize(), once);
}

#[test]
fn equality_is_symmetric_after_normalization() {
    let a = Value::Sequence(vec![Value::Unit, Value::Unit]).normalize();
    let b = Value::Count(2);
    assert_eq!(a == b, b == a);
    assert_eq!(a, b);
}

#[test]
fn unit_sequences_collapse() {
    for n in 0..5 {
        let value = Value::Sequence(vec![Value::Unit; n]);
        assert_eq!(value.normalize(), Value::Count(n));
    }
}

#[test]
fn arrays_and_spreads() {
    assert_report("[...3, ...2]", "0> 5");
    assert_report("[1, ...[2, 3]]", "0> [1, 2, 3]");
    assert_report("[...[_, 1], ..._ extends _ ? [2] : []]", "0> [_, 1, 2]");
    assert_report_contains("[..._]", "Cannot spread a unit");
}

#[test]
fn addition_is_concatenation() {
    assert_report("type Add<N1, N2> = [...N1, ...N2]\nAdd<5, 8>", "0> 13");
}

#[test]
fn subtraction_by_pattern_matching() {
    let source = "type Subtract<N1, N2> = N1 extends [...infer Result, ...N2] ? Result : abort
Subtract<5, 2>
Subtract<2, 5>";
    assert_report(source,
                  "0> 3\n1> Error on line 1: Exiting due to abort keyword.");
}

#[test]
fn spread_captures_anchor_front_and_back() {
    let source = "type Split<X> = X extends [infer A, ...infer Rest, infer B] ? [A, Rest, B] : abort
Split<5>";
    assert_report(source, "0> [_, 3, _]");
}

#[test]
fn fixed_patterns_require_exact_length() {
    let source = "type IsPair<X> = X extends [infer, infer] ? 1 : 0
IsPair<[1, 2]>
IsPair<[1, 2, 3]>
IsPair<2>
IsPair<_>";
    assert_report(source, "0> 1\n1> 0\n2> 1\n3> 0");
}

#[test]
fn counts_stay_compact_in_patterns() {
    // [2] is a one-element sequence holding a count, not two units, so it
    // only matches evaluatees of the same shape.
    let source = "type M<X> = X extends [2] ? 1 : 0
M<[2]>
M<[_, _]>";
    assert_report(source, "0> 1\n1> 0");
}

#[test]
fn equality_conditionals() {
    assert_report("5 extends 5 ? 1 : 0", "0> 1");
    let source = "type Eq<A, B> = A extends B ? 1 : 0
Eq<[1, 2], [1, 2]>
Eq<3, [_, _, _]>
Eq<_, 1>";
    assert_report(source, "0> 1\n1> 1\n2> 0");
}

#[test]
fn default_parameters_see_earlier_bindings() {
    let source = "type Pair<X, Y = X> = [X, Y]
Pair<4>
Pair<4, 9>";
    assert_report(source, "0> [4, 4]\n1> [4, 9]");
}

#[test]
fn default_parameters_cannot_see_caller_environment() {
    let source = "type Outer<Z> = Inner<>
type Inner<A = Z> = A
Outer<1>";
    assert_report_contains(source, "Parameter 'Z' is not bound");
}

#[test]
fn missing_argument_is_reported() {
    let source = "type Pair<X, Y> = [X, Y]\nPair<1>";
    assert_report_contains(source,
                           "No value passed for parameter 'Y' when calling template 'Pair'");
}

#[test]
fn extra_arguments_are_ignored() {
    assert_report("type First<X> = X\nFirst<1, 2, 3>", "0> 1");
}

#[test]
fn unbound_parameter_is_reported() {
    assert_report_contains("type Broken<A> = Z\nBroken<1>", "Parameter 'Z' is not bound");
}

#[test]
fn abort_carries_its_message() {
    assert_report("abort(\"boom\")",
                  "0> Error on line 1: Exiting due to abort keyword: boom");
    assert_report("abort", "0> Error on line 1: Exiting due to abort keyword.");
}

#[test]
fn strings_are_tagged_sequences() {
    assert_report("\"hi\"", "0> \"hi\"");
    assert_report("\"say \\\"hi\\\"\"", "0> \"say \\\"hi\\\"\"");
    // The tag is observable by pattern matching.
    let source = "type Tag<S> = S extends [infer T, infer] ? T : abort\nTag<\"hi\">";
    assert_report(source, "0> 51224");
    // An empty string's character list collapses to a count, so the shape
    // is lost and it renders as a plain array.
    assert_report("\"\"", "0> [51224, 0]");
}

#[test]
fn skip_consumes_without_binding() {
    let source = "type Third<X> = X extends [skip 2, infer A, ...infer] ? A : abort
Third<[5, 6, 7, 8]>
Third<[5, 6, 7]>";
    assert_report(source, "0> 7\n1> 7");
    assert_report_contains("type Bad<X> = X extends [skip _, infer A] ? A : 0\nBad<[1, 2]>",
                           "Non-count value passed to skip");
}

#[test]
fn multiple_spread_captures_are_rejected() {
    assert_rejected("type Two<X> = X extends [...infer A, ...infer B] ? A : B\nTwo<3>");
}

#[test]
fn comments_keep_line_numbers() {
    assert_report("/* leading\ncomment */\nabort",
                  "0> Error on line 3: Exiting due to abort keyword.");
    assert_report("// just a comment\n5", "0> 5");
}

#[test]
fn malformed_scripts_are_rejected() {
    assert_rejected("type = 5");
    assert_rejected("[1, 2");
    assert_rejected("type T<X> = X extends [1] ? 1");
    assert_rejected("import from \"./nowhere.inferra\"");
}

#[test]
fn failing_expressions_do_not_abort_siblings() {
    assert_report("Missing<1>\n7",
                  "0> Error on line 1: Template 'Missing' not found.\n1> 7");
}

#[test]
fn imports_resolve_qualified_and_unqualified() {
    let report = run_file("tests/programs/imports_main.inferra").expect("import fixture failed");
    assert_eq!(report, "0> 3\n1> 0\n2> 2");
}

#[test]
fn diamond_imports_share_one_context() {
    let report = run_file("tests/programs/diamond.inferra").expect("diamond fixture failed");
    assert_eq!(report, "0> 5");
}

#[test]
fn importing_an_unexported_name_fails() {
    let result = run_file("tests/programs/modules/secret_import.inferra");
    let message = result.expect_err("import of unexported name succeeded").to_string();
    assert!(message.contains("is not exported"), "{message}");
}

#[test]
fn importing_a_missing_name_fails() {
    let result = run_file("tests/programs/modules/missing_import.inferra");
    let message = result.expect_err("import of missing name succeeded").to_string();
    assert!(message.contains("Could not find template 'Nope'"), "{message}");
}

#[test]
fn qualified_calls_respect_export_visibility() {
    let report = run_file("tests/programs/modules/qualified_secret.inferra").expect("fixture failed");
    assert!(report.contains("is not exported"), "{report}");
}

#[test]
fn alias_imports_do_not_leak_unqualified_names() {
    let report = run_file("tests/programs/modules/alias_only.inferra").expect("fixture failed");
    assert!(report.contains("Template 'Inc' not found"), "{report}");
}

#[test]
fn local_declarations_shadow_later_imports() {
    let report = run_file("tests/programs/modules/shadow.inferra").expect("fixture failed");
    assert_eq!(report, "0> 100");
}

#[test]
fn unknown_module_alias_is_reported() {
    assert_report_contains("ghost::Thing<1>", "Could not find module 'ghost'");
}

#[test]
fn missing_module_file_fails_the_run() {
    let result = run("import { X } from \"./does_not_exist.inferra\"\n1");
    let message = result.expect_err("missing module load succeeded").to_string();
    assert!(message.contains("Could not read module"), "{message}");
}

#[test]
fn import_cycles_are_detected() {
    let result = run_file("tests/programs/cycles/a.inferra");
    let message = result.expect_err("cyclic import graph loaded").to_string();
    assert!(message.contains("Import cycle"), "{message}");
}

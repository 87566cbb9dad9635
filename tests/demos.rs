use std::fs;

use lox_expr::error::Diagnostics;
use lox_expr::{run, DEFAULT_MAX_DEPTH};
use walkdir::WalkDir;

enum Expectation {
    Value(String),
    Error(String),
}

fn expectation(content: &str) -> Option<Expectation> {
    let first = content.lines().next()?.trim();
    if let Some(rest) = first.strip_prefix("// expect error:") {
        Some(Expectation::Error(rest.trim().to_string()))
    } else {
        first
            .strip_prefix("// expect:")
            .map(|rest| Expectation::Value(rest.trim().to_string()))
    }
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "lox"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = expectation(&content)
            .unwrap_or_else(|| panic!("{path:?} has no leading // expect comment"));

        let mut diagnostics = Diagnostics::new();
        let result = run(&content, DEFAULT_MAX_DEPTH, &mut diagnostics);
        let mut errors: Vec<String> = diagnostics
            .drain_syntax()
            .iter()
            .map(|err| err.to_string())
            .collect();
        errors.extend(diagnostics.drain_runtime().iter().map(|err| err.to_string()));

        match expected {
            Expectation::Value(value) => {
                assert!(errors.is_empty(), "{path:?} failed: {errors:?}");
                let actual = result
                    .value
                    .unwrap_or_else(|| panic!("{path:?} produced no value"))
                    .to_string();
                assert_eq!(actual, value, "{path:?}");
            }
            Expectation::Error(message) => {
                assert!(
                    errors.iter().any(|err| err == &message),
                    "{path:?} expected {message:?}, got {errors:?}"
                );
            }
        }
        count += 1;
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

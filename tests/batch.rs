mod common;

use crosswalk::{ErrorType, SourceInput, Translator};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn failures_stay_with_their_file() {
    let sources = vec![
        SourceInput::new("Good.java", "class Good {}\n"),
        SourceInput::new("Broken.java", "class Broken {\n"),
        SourceInput::new("Shift.java", "class Shift { int f(int x) { return x >>> 1; } }\n"),
        SourceInput::new("Other.java", "class Other {}\nclass Extra {}\n"),
    ];
    let outcomes = Translator::cpp().translate_batch(&sources);

    let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Good.java", "Broken.java", "Shift.java", "Other.java"]);

    // A header and a source file per type.
    assert_eq!(outcomes[0].result.as_ref().unwrap().len(), 2);
    let parse_error = outcomes[1].result.as_ref().unwrap_err();
    assert_eq!(parse_error.error_type(), ErrorType::Parse);
    let unsupported = outcomes[2].result.as_ref().unwrap_err();
    assert_eq!(unsupported.error_type(), ErrorType::Unsupported);
    assert_eq!(outcomes[3].result.as_ref().unwrap().len(), 4);
}

#[test]
fn translating_twice_gives_identical_output() {
    let text = "package p;\n\n// lead\npublic class A {\n    int n = 1; // one\n}\n";
    let parsed = common::parse_ok(text);
    for translator in [Translator::cpp(), Translator::csharp()] {
        let first = translator.translate_file(&parsed).unwrap();
        let second = translator.translate_file(&parsed).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn batch_matches_single_file_translation() {
    let text = "class A {\n    void f() { g(); }\n}\n";
    let translator = Translator::csharp();
    let single = translator.translate_file(&common::parse_ok(text)).unwrap();
    let outcomes = translator.translate_batch(&[SourceInput::new("A.java", text)]);
    assert_eq!(outcomes[0].result.as_ref().unwrap(), &single);
}

#[test]
fn write_files_creates_one_file_per_type() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let parsed = common::parse_ok("class A {}\nclass B {}\n");
    let written = Translator::csharp().write_files(&parsed, &out_dir).unwrap();

    assert_eq!(written, vec![out_dir.join("A.cs"), out_dir.join("B.cs")]);
    assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "class B {}\n");
}

#[test]
fn failing_file_writes_nothing() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let parsed = common::parse_ok("class A {}\nclass B { boolean f(Object o) { return o instanceof B; } }\n");
    assert!(Translator::cpp().write_files(&parsed, &out_dir).is_err());
    assert!(!out_dir.exists());
}

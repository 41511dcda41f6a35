use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn crosswalk() -> Command {
    Command::cargo_bin("crosswalk").unwrap()
}

fn write_source(dir: &Path, name: &str, text: &str) {
    if let Some(parent) = dir.join(name).parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn show_prints_the_translation() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "A.java", "class A {\n    String s = null;\n}\n");
    crosswalk()
        .args(["show", "--target", "cpp"])
        .arg(dir.path().join("A.java"))
        .assert()
        .success()
        .stdout(predicate::str::contains("// ---- A.h ----"))
        .stdout(predicate::str::contains("class A {\npublic:\n    String *s = nullptr;\n};\n"))
        .stdout(predicate::str::contains("// ---- A.cpp ----"))
        .stdout(predicate::str::contains("#include \"A.h\"\n"));
}

#[test]
fn translate_writes_header_and_source_for_cpp() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    write_source(&src, "A.java", "class A {\n    int f() {\n        return 1;\n    }\n}\n");
    let out = dir.path().join("out");

    crosswalk()
        .args(["translate", "--target", "cpp", "--out"])
        .arg(&out)
        .arg(&src)
        .assert()
        .success()
        .stderr(predicate::str::contains("(2 outputs)"));

    assert_eq!(
        fs::read_to_string(out.join("A.h")).unwrap(),
        "class A {\npublic:\n    int f();\n};\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("A.cpp")).unwrap(),
        "#include \"A.h\"\n\nint A::f() {\n    return 1;\n}\n"
    );
}

#[test]
fn show_separates_multiple_outputs() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "A.java", "class A {}\nclass B {}\n");
    crosswalk()
        .args(["show", "-t", "csharp"])
        .arg(dir.path().join("A.java"))
        .assert()
        .success()
        .stdout(predicate::str::contains("// ---- A.cs ----"))
        .stdout(predicate::str::contains("// ---- B.cs ----"));
}

#[test]
fn translate_walks_directories_and_writes_outputs() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    write_source(&src, "a/A.java", "class A {}\n");
    write_source(&src, "b/B.java", "class B {}\nclass C {}\n");
    write_source(&src, "notes.txt", "not java");
    let out = dir.path().join("out");

    crosswalk()
        .args(["translate", "--target", "csharp", "--out"])
        .arg(&out)
        .arg(&src)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 ok, 0 failed"));

    assert_eq!(fs::read_to_string(out.join("A.cs")).unwrap(), "class A {}\n");
    assert!(out.join("B.cs").exists());
    assert!(out.join("C.cs").exists());
}

#[test]
fn check_fails_on_unsupported_constructs() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "Ok.java", "class Ok {}\n");
    write_source(
        dir.path(),
        "Bad.java",
        "class Bad {\n    boolean f(Object o) { return o instanceof Bad; }\n}\n",
    );
    crosswalk()
        .args(["check", "--target", "cpp"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 ok, 1 failed"))
        .stderr(predicate::str::contains("instanceof"));
}

#[test]
fn parse_errors_exit_with_failure() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "Broken.java", "class Broken {\n");
    crosswalk()
        .args(["show", "--target", "csharp"])
        .arg(dir.path().join("Broken.java"))
        .assert()
        .code(1);
}

#[test]
fn ast_dumps_json() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "A.java", "class A { int n; }\n");
    crosswalk()
        .arg("ast")
        .arg(dir.path().join("A.java"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"types\""))
        .stdout(predicate::str::contains("\"n\""));
}

#[test]
fn profile_prints_defaults() {
    crosswalk()
        .args(["profile", "--target", "csharp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("language: csharp"));
}

#[test]
fn profile_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "A.java", "class A { String s; }\n");
    write_source(dir.path(), "profile.yaml", "pointer_style: caret\n");
    crosswalk()
        .args(["show", "--target", "cpp", "--profile"])
        .arg(dir.path().join("profile.yaml"))
        .arg(dir.path().join("A.java"))
        .assert()
        .success()
        .stdout(predicate::str::contains("String ^s;"));
}

#[test]
fn invalid_profile_is_reported() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "A.java", "class A {}\n");
    write_source(dir.path(), "profile.yaml", "language: csharp\n");
    crosswalk()
        .args(["show", "--target", "cpp", "--profile"])
        .arg(dir.path().join("profile.yaml"))
        .arg(dir.path().join("A.java"))
        .assert()
        .code(1);
}

#[test]
fn unknown_target_is_rejected() {
    crosswalk()
        .args(["profile", "--target", "java"])
        .assert()
        .failure();
}

mod common;

use common::{translate_single, translate_statement};
use crosswalk::{ErrorType, Translator};
use pretty_assertions::assert_eq;

const POINT: &str = "package geo;

import java.util.List;

/** A point. */
public class Point extends Base {
    private int x; // x coord
    public String name;

    public int getX() {
        return this.x;
    }
}
";

#[test]
fn class_with_package_import_and_members() {
    let parsed = common::parse_ok(POINT);
    let outputs = Translator::csharp().translate_file(&parsed).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].file_name, "Point.cs");
    assert_eq!(
        outputs[0].contents,
        "namespace geo;

using java.util;

/** A point. */
public class Point : Base {
    private int x; // x coord
    public string name;

    public int getX() {
        return this.x;
    }
}
"
    );
}

#[test]
fn on_demand_import_uses_the_package() {
    let out = translate_single(&Translator::csharp(), "import java.util.*;\nclass A {}\n").unwrap();
    assert_eq!(out, "using java.util;\nclass A {}\n");
}

#[test]
fn foreach_replaces_enhanced_for() {
    let translator = Translator::csharp();
    assert_eq!(
        translate_statement(&translator, "for (String s : names) {}").unwrap(),
        "foreach (string s in names) {}"
    );
    assert_eq!(
        translate_statement(&translator, "for (String s:names) {}").unwrap(),
        "foreach (string s in names) {}"
    );
}

#[test]
fn instanceof_becomes_is() {
    let out = translate_statement(&Translator::csharp(), "boolean b = o instanceof String;").unwrap();
    assert_eq!(out, "bool b = o is string;");
}

#[test]
fn final_field_becomes_readonly() {
    let out = translate_single(
        &Translator::csharp(),
        "class C { private final int n = 1; }\n",
    )
    .unwrap();
    assert_eq!(out, "class C { private readonly int n = 1; }\n");
}

#[test]
fn final_class_becomes_sealed() {
    let out = translate_single(&Translator::csharp(), "public final class C {}\n").unwrap();
    assert_eq!(out, "public sealed class C {}\n");
}

#[test]
fn final_parameter_loses_its_modifier() {
    let out = translate_single(
        &Translator::csharp(),
        "class A {\n    void f(final int x) {}\n}\n",
    )
    .unwrap();
    assert_eq!(out, "class A {\n    void f(int x) {}\n}\n");
}

#[test]
fn final_local_becomes_const() {
    let out = translate_statement(&Translator::csharp(), "final int x = 5;").unwrap();
    assert_eq!(out, "const int x = 5;");
}

#[test]
fn unsigned_shift_and_null_are_kept() {
    let translator = Translator::csharp();
    assert_eq!(
        translate_statement(&translator, "int y = x >>> 2;").unwrap(),
        "int y = x >>> 2;"
    );
    assert_eq!(
        translate_statement(&translator, "Object o = null;").unwrap(),
        "object o = null;"
    );
}

#[test]
fn arrays_are_copied() {
    let out = translate_statement(&Translator::csharp(), "int[] a = new int[] {1, 2,};").unwrap();
    assert_eq!(out, "int[] a = new int[] {1, 2,};");
}

#[test]
fn static_import_is_unsupported() {
    let err = translate_single(
        &Translator::csharp(),
        "import static java.lang.Math.max;\nclass A {}\n",
    )
    .unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Unsupported);
}

mod common;

use common::{translate_single, translate_statement};
use crosswalk::{ErrorType, TargetLanguage, TargetProfile, Translator};
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
    let outputs = Translator::cpp().translate_file(&parsed).unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].file_name, "Point.h");
    assert_eq!(
        outputs[0].contents,
        "#include \"List.h\"

namespace geo {

/** A point. */
class Point : public Base {
    int x; // x coord
public:
    String *name;

    int getX();
};
}
"
    );
    assert_eq!(outputs[1].file_name, "Point.cpp");
    assert_eq!(
        outputs[1].contents,
        "#include \"Point.h\"

namespace geo {

int Point::getX() {
    return this->x;
}

}
"
    );
}

#[test]
fn source_file_keeps_comments_and_drops_modifiers() {
    let text = "class Counter {
    private int n;

    // Bumps the count.
    public static void bump(int by) {
        /* step
         * by step */
        n += by; // add
    }

    Counter() { n = 0; }
}
";
    let header = translate_single(&Translator::cpp(), text).unwrap();
    assert!(header.contains("    static void bump(int by);\n"), "{}", header);
    assert!(header.contains("    Counter();\n"), "{}", header);

    let source = common::translate_definitions(text).unwrap();
    assert_eq!(
        source,
        "#include \"Counter.h\"

// Bumps the count.
void Counter::bump(int by) {
    /* step
     * by step */
    n += by; // add
}

Counter::Counter() { n = 0; }
"
    );
}

#[test]
fn interface_fields_are_static_const() {
    let text = "interface Limits { int MAX = 5; void check(); }\n";
    let out = translate_single(&Translator::cpp(), text).unwrap();
    assert_eq!(
        out,
        "class Limits { public: static const int MAX = 5; virtual void check() = 0; };\n"
    );
}

#[test]
fn interface_field_modifiers_are_not_doubled() {
    let text = "interface Limits {\n    public static final int MAX = 5;\n}\n";
    let out = translate_single(&Translator::cpp(), text).unwrap();
    assert_eq!(out, "class Limits {\npublic:\n    static const int MAX = 5;\n};\n");
}

#[test]
fn comments_between_modifiers_survive() {
    let text = "interface Shape {\n    @Deprecated\n    // legacy\n    public double area();\n}\n";
    let out = translate_single(&Translator::cpp(), text).unwrap();
    assert_eq!(
        out,
        "class Shape {\npublic:\n    // legacy\n    virtual double area() = 0;\n};\n"
    );
}

#[test]
fn crlf_sources_get_crlf_throughout() {
    let text = "package p;\r\n\r\nclass A {\r\n    int x;\r\n    public int y;\r\n}\r\n";
    let parsed = common::parse_ok(text);
    for output in Translator::cpp().translate_file(&parsed).unwrap() {
        let bare = output.contents.replace("\r\n", "");
        assert!(!bare.contains('\n'), "lone newline in {}: {:?}", output.file_name, output.contents);
    }
}

#[test]
fn slashes_inside_block_comments_do_not_start_comments() {
    let text = "class A {\n    void f() {\n        String u = \"x\"; /* a\n           http://b */ int y = 1;\n    }\n}\n";
    let source = common::translate_definitions(text).unwrap();
    assert_eq!(
        source,
        "#include \"A.h\"\n\nvoid A::f() {\n    String *u = \"x\"; /* a\n       http://b */ int y = 1;\n}\n"
    );
}

#[test]
fn interface_methods_become_pure_virtual() {
    let text = "public interface Shape {\n    double area();\n}\n";
    let out = translate_single(&Translator::cpp(), text).unwrap();
    assert_eq!(out, "class Shape {\npublic:\n    virtual double area() = 0;\n};\n");
}

#[test]
fn extends_and_implements_become_public_bases() {
    let text = "class A extends B implements I, J {}\n";
    let out = translate_single(&Translator::cpp(), text).unwrap();
    assert_eq!(out, "class A : public B, public I, public J {};\n");
}

#[test]
fn trailing_comment_after_type_stays_on_its_line() {
    let out = translate_single(&Translator::cpp(), "class A {} // done\n").unwrap();
    assert_eq!(out, "class A {}; // done\n");
}

#[test]
fn access_label_inline_for_single_line_members() {
    let out = translate_single(&Translator::cpp(), "class A { public int x; }\n").unwrap();
    assert_eq!(out, "class A { public: int x; };\n");
}

#[test]
fn final_local_becomes_const() {
    let out = translate_statement(&Translator::cpp(), "final int x = 5;").unwrap();
    assert_eq!(out, "const int x = 5;");
}

#[test]
fn multiple_fragments_keep_their_layout() {
    let out = translate_statement(&Translator::cpp(), "int a, b = 2;").unwrap();
    assert_eq!(out, "int a, b = 2;");
}

#[test]
fn reference_local_gets_pointer_and_nullptr() {
    let out = translate_statement(&Translator::cpp(), "String s = null;").unwrap();
    assert_eq!(out, "String *s = nullptr;");
}

#[test]
fn member_selector_depends_on_receiver() {
    let translator = Translator::cpp();
    assert_eq!(
        translate_statement(&translator, "Math.max(a, b);").unwrap(),
        "Math::max(a, b);"
    );
    assert_eq!(
        translate_statement(&translator, "list.add(x);").unwrap(),
        "list->add(x);"
    );
}

#[test]
fn arrays_map_to_array_template() {
    let out = translate_statement(&Translator::cpp(), "int[] xs = new int[n];").unwrap();
    assert_eq!(out, "Array<int> *xs = new Array<int>(n);");
}

#[test]
fn type_arguments_carry_pointer_markers() {
    let out = translate_statement(
        &Translator::cpp(),
        "List<String> names = new ArrayList<String>();",
    )
    .unwrap();
    assert_eq!(out, "List<String*> *names = new ArrayList<String*>();");
}

#[test]
fn enhanced_for_keeps_range_syntax() {
    let out = translate_statement(&Translator::cpp(), "for (String s : names) {}").unwrap();
    assert_eq!(out, "for (String *s : names) {}");
}

#[test]
fn cast_to_reference_type_gets_marker() {
    let out = translate_statement(&Translator::cpp(), "Object o = (Object) s;").unwrap();
    assert_eq!(out, "Object *o = (Object*) s;");
}

#[test]
fn profile_pointer_style_and_renames_apply() {
    let yaml = "pointer_style: caret\ntype_renames:\n  String: System::String\n";
    let profile = TargetProfile::from_yaml_str(TargetLanguage::Cpp, yaml).unwrap();
    let out = translate_statement(&Translator::new(profile), "String s = null;").unwrap();
    assert_eq!(out, "System::String ^s = nullptr;");
}

#[test]
fn unsupported_constructs_are_reported() {
    let translator = Translator::cpp();
    let cases = [
        "int y = x >>> 2;",
        "x >>>= 2;",
        "boolean b = o instanceof String;",
        "break outer;",
        "continue outer;",
        "int[] a = {1, 2};",
        "int[][] grid = new int[2][3];",
    ];
    for statement in cases {
        let err = translate_statement(&translator, statement).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Unsupported, "{}", statement);
    }
}

#[test]
fn generic_class_is_unsupported() {
    let err = translate_single(&Translator::cpp(), "class Box<T> {}\n").unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Unsupported);
}

#[test]
fn unsupported_error_points_at_the_construct() {
    let err = translate_single(
        &Translator::cpp(),
        "class A {\n    void f() {\n        int y = x >>> 2;\n    }\n}\n",
    )
    .unwrap_err();
    let position = err.position().expect("unsupported errors carry a position");
    assert_eq!(position.line, 3);
    assert!(position.line_text.contains(">>>"));
}

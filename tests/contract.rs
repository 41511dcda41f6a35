//! Position contract: every writer starts on its node and leaves the cursor at (or past) its end.

mod common;

use std::collections::BTreeSet;

use crosswalk::ast::{NodeKind, NodeRef};
use crosswalk::context::{TranslationContext, WriterEnv};
use crosswalk::output::OutputBuffer;
use crosswalk::writers;
use crosswalk::{ErrorType, TargetProfile, Translator};

/// Exercises every node kind.
const EVERY_KIND: &str = "package demo.shapes;

import java.util.List;

/** Demo. */
public abstract class Box<T> extends Base implements Comparable<T> {
    private static final int LIMIT = 10;
    protected String[] names = new String[] {\"a\", \"b\"};

    @Override
    public int size(final int scale, List<String> extra) throws Problem {
        int total = 0;
        for (int i = 0, j = 1; i < LIMIT; i++, j--) {
            total += names[i].length() * scale;
        }
        for (String n : extra) {
            if (n instanceof Object) {
                continue;
            } else {
                break;
            }
        }
        while (total > 100) total = total / 2;
        do {
            total = -total; // flip
        } while (total < 0);
        Box<T> other = new Box<T>();
        this.count = ((double) total) > 1.5 ? total : 0;
        ;
        if (total == 0) throw new Problem();
        return total;
    }

    abstract void reset();
}
";

/// The same shapes without the constructs C++ rejects.
const CPP_SAFE: &str = "package demo.shapes;

import java.util.List;

public abstract class Box extends Base implements Comparable<Object> {
    private static final int LIMIT = 10;
    protected String[] names = new String[] {\"a\", \"b\"};

    @Override
    public int size(final int scale, List<String> extra) throws Problem {
        int total = 0;
        for (int i = 0, j = 1; i < LIMIT; i++, j--) {
            total += names[i].length() * scale;
        }
        for (String n : extra) {
            if (n == null) {
                continue;
            }
        }
        List<String> other = new ArrayList<String>();
        this.count = ((double) total) > 1.5 ? total : 0;
        return total;
    }

    abstract void reset();
}
";

#[test]
fn sample_covers_every_node_kind() {
    let parsed = common::parse_ok(EVERY_KIND);
    let seen: BTreeSet<NodeKind> = NodeRef::from(&parsed.unit)
        .descendants()
        .iter()
        .map(|node| node.kind())
        .collect();
    let missing: Vec<_> = NodeKind::ALL
        .iter()
        .filter(|kind| !seen.contains(kind))
        .collect();
    assert!(missing.is_empty(), "kinds not in sample: {:?}", missing);
}

fn assert_every_node_translates(translator: &Translator, text: &str) {
    let parsed = common::parse_ok(text);
    for node in NodeRef::from(&parsed.unit).descendants() {
        if let Err(e) = translator.translate_node(&parsed, node) {
            let span = node.span();
            panic!(
                "{} `{}` failed: {}",
                node.kind(),
                &text[span.start..span.end],
                e
            );
        }
    }
}

#[test]
fn every_node_translates_alone_csharp() {
    assert_every_node_translates(&Translator::csharp(), EVERY_KIND);
}

#[test]
fn every_node_translates_alone_cpp() {
    assert_every_node_translates(&Translator::cpp(), CPP_SAFE);
}

#[test]
fn whole_files_translate() {
    let parsed = common::parse_ok(EVERY_KIND);
    assert!(Translator::csharp().translate_file(&parsed).is_ok());
    let parsed = common::parse_ok(CPP_SAFE);
    assert!(Translator::cpp().translate_file(&parsed).is_ok());
}

#[test]
fn dispatch_boundaries_never_move_backward() {
    for (profile, text) in [
        (TargetProfile::csharp(), EVERY_KIND),
        (TargetProfile::cpp(), CPP_SAFE),
    ] {
        let parsed = common::parse_ok(text);
        let mut out = OutputBuffer::new();
        let mut ctx = TranslationContext::new(&parsed.source, &profile, &mut out);
        ctx.record_dispatch_boundaries();
        writers::write_node(&mut ctx, WriterEnv::new(), NodeRef::from(&parsed.unit)).unwrap();

        let boundaries = ctx.dispatch_boundaries();
        assert!(boundaries.len() > 2);
        assert_eq!(boundaries[0], parsed.unit.span.start);
        for pair in boundaries.windows(2) {
            assert!(pair[0] <= pair[1], "cursor moved back: {:?}", pair);
        }
        assert!(*boundaries.last().unwrap() <= text.len());
    }
}

#[test]
fn writer_entered_off_its_start_is_an_internal_error() {
    let parsed = common::parse_ok("class A {\n    int n;\n}\n");
    let field = NodeRef::from(&parsed.unit.types[0].body[0]);
    let profile = TargetProfile::cpp();
    let mut out = OutputBuffer::new();
    let mut ctx = TranslationContext::new(&parsed.source, &profile, &mut out);
    let err = writers::write_node(&mut ctx, WriterEnv::new(), field).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Internal);
}

#[test]
fn block_outside_method_implementation_is_an_internal_error() {
    let parsed = common::parse_ok("class A {\n    void f() {}\n}\n");
    let method = common::first_method(&parsed);
    let body = method.body.as_ref().unwrap();
    let profile = TargetProfile::csharp();
    let mut out = OutputBuffer::new();
    let mut ctx = TranslationContext::new(&parsed.source, &profile, &mut out);
    ctx.set_position(body.span.start);
    let err = writers::write_node(&mut ctx, WriterEnv::new(), NodeRef::from(body)).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Internal);
}

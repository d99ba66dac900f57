// SPDX-License-Identifier: Apache-2.0

// Callback sequence tests: feed documents one byte at a time and check the
// order, names, and values of the fired hooks.

use std::cell::RefCell;

use sipjson::{ErrorKind, Parser};

/// Feeds `input` through a parser with every hook recording into one log.
fn run(input: &[u8]) -> Vec<String> {
    let events = RefCell::new(Vec::new());
    let mut object_start = |name: &str| events.borrow_mut().push(format!("obj+({name})"));
    let mut object_complete = |name: &str| events.borrow_mut().push(format!("obj-({name})"));
    let mut array_start = |name: &str| events.borrow_mut().push(format!("arr+({name})"));
    let mut array_complete = |name: &str| events.borrow_mut().push(format!("arr-({name})"));
    let mut string = |name: &str, value: &str| {
        events.borrow_mut().push(format!("str({name}={value})"));
    };
    let mut integer = |name: &str, value: i64| {
        events.borrow_mut().push(format!("int({name}={value})"));
    };
    let mut error = |kind: ErrorKind, _label: &str, _context: &str| {
        events.borrow_mut().push(format!("err({kind:?})"));
    };

    let mut parser = Parser::new();
    parser.set_on_object_start(Some(&mut object_start));
    parser.set_on_object_complete(Some(&mut object_complete));
    parser.set_on_array_start(Some(&mut array_start));
    parser.set_on_array_complete(Some(&mut array_complete));
    parser.set_on_string(Some(&mut string));
    parser.set_on_integer(Some(&mut integer));
    parser.set_on_error(Some(&mut error));

    parser.feed_bytes(input);
    drop(parser);
    let out = events.borrow().clone();
    out
}

#[test_log::test]
fn simple_integer_member() {
    assert_eq!(run(b"{\"a\":1}"), ["obj+()", "int(a=1)", "obj-()"]);
}

#[test_log::test]
fn simple_string_member() {
    assert_eq!(run(b"{\"x\":\"hi\"}"), ["obj+()", "str(x=hi)", "obj-()"]);
}

#[test_log::test]
fn several_scalar_members() {
    assert_eq!(
        run(b"{\"a\":1,\"b\":\"two\",\"c\":3}"),
        ["obj+()", "int(a=1)", "str(b=two)", "int(c=3)", "obj-()"]
    );
}

#[test_log::test]
fn whitespace_is_tolerated_everywhere() {
    assert_eq!(
        run(b" { \"a\" : 1 ,\r\n\t\"b\" : 2 } "),
        ["obj+()", "int(a=1)", "int(b=2)", "obj-()"]
    );
}

#[test_log::test]
fn signed_integers() {
    assert_eq!(run(b"{\"t\":-12}"), ["obj+()", "int(t=-12)", "obj-()"]);
    assert_eq!(run(b"{\"t\":+7}"), ["obj+()", "int(t=7)", "obj-()"]);
}

#[test_log::test]
fn escape_sequences_are_preserved_not_decoded() {
    assert_eq!(
        run(br#"{"x":"a\"b"}"#),
        ["obj+()", r#"str(x=a\"b)"#, "obj-()"]
    );
    assert_eq!(
        run(br#"{"x":"c\\d"}"#),
        ["obj+()", r#"str(x=c\\d)"#, "obj-()"]
    );
}

#[test_log::test]
fn nested_object_as_last_member() {
    assert_eq!(
        run(b"{\"outer\":{\"inner\":5}}"),
        [
            "obj+()",
            "obj+(outer)",
            "int(inner=5)",
            "obj-(outer)",
            "obj-()"
        ]
    );
}

#[test_log::test]
fn array_of_named_values() {
    // Array elements carry their own names in this dialect, matching the
    // gateway messages this engine was built for.
    assert_eq!(
        run(b"{\"list\":[\"x\":1,\"y\":2]}"),
        [
            "obj+()",
            "arr+(list)",
            "int(x=1)",
            "int(y=2)",
            "arr-(list)",
            "obj-()"
        ]
    );
}

#[test_log::test]
fn top_level_name_value_pair() {
    // A bare "name":value fragment is accepted at the top level.
    assert_eq!(run(b"\"a\":1 \n"), ["int(a=1)"]);
}

#[test_log::test]
fn sequential_documents_on_one_instance() {
    assert_eq!(
        run(b"{\"a\":1} {\"b\":2}"),
        ["obj+()", "int(a=1)", "obj-()", "obj+()", "int(b=2)", "obj-()"]
    );
}

#[test_log::test]
fn empty_object_is_rejected() {
    // The grammar always expects a member name after `{`.
    assert_eq!(run(b"{}"), ["obj+()", "err(ParseName)"]);
}

#[test_log::test]
fn empty_string_value() {
    assert_eq!(run(b"{\"s\":\"\"}"), ["obj+()", "str(s=)", "obj-()"]);
}

#[test_log::test]
fn unconvertible_number_literal_is_an_error() {
    // A lone sign never becomes a number; the terminator exposes it.
    assert_eq!(run(b"{\"n\":-}"), ["obj+()", "err(ParseValue)"]);
}

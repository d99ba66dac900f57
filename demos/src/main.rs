// SPDX-License-Identifier: Apache-2.0

//! Feeds a sample gateway announcement through the parser one byte at a
//! time and prints every callback. Run with `RUST_LOG=trace` to see the
//! state transitions.

use sipjson::{ErrorKind, ParserPool};

const SAMPLE: &str =
    r#"{ "status": { "name": "plug_0a1b", "power": 215, "joined": ["ts":1403, "cnt":2] } }"#;

fn main() {
    env_logger::init();

    let mut object_start = |name: &str| println!("object start    '{name}'");
    let mut object_complete = |name: &str| println!("object complete '{name}'");
    let mut array_start = |name: &str| println!("array start     '{name}'");
    let mut array_complete = |name: &str| println!("array complete  '{name}'");
    let mut string = |name: &str, value: &str| println!("string          {name} = {value:?}");
    let mut integer = |name: &str, value: i64| println!("integer         {name} = {value}");
    let mut error = |kind: ErrorKind, label: &str, context: &str| {
        println!("error           {kind:?} ({label}) near '{context}'");
    };

    let mut pool: ParserPool = ParserPool::new();
    pool.set_on_object_start(Some(&mut object_start));
    pool.set_on_object_complete(Some(&mut object_complete));
    pool.set_on_array_start(Some(&mut array_start));
    pool.set_on_array_complete(Some(&mut array_complete));
    pool.set_on_string(Some(&mut string));
    pool.set_on_integer(Some(&mut integer));
    pool.set_on_error(Some(&mut error));

    println!("input: {SAMPLE}");
    for byte in SAMPLE.bytes() {
        pool.feed(byte);
    }
}

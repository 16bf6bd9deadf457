//! Test that an unknown struct option produces a compile error.

use fieldlens::Accessors;

#[derive(Accessors)]
#[accessors(public, fluent)]
struct Point {
    pub x: i32,
}

fn main() {}

//! Test that deriving Accessors on a tuple struct produces a compile error.

use fieldlens::Accessors;

#[derive(Accessors)]
struct Pair(i32, i32);

fn main() {}

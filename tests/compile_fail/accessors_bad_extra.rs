//! Test that an extra line that is not an attribute produces a compile error.

use fieldlens::Accessors;

#[derive(Accessors)]
#[accessors(extra = "fn not_an_attribute() {}")]
struct Point {
    pub x: i32,
}

fn main() {}

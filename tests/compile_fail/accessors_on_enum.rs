//! Test that deriving Accessors on an enum produces a compile error.

use fieldlens::Accessors;

#[derive(Accessors)]
enum Shape {
    Circle(f64),
    Square(f64),
}

fn main() {}

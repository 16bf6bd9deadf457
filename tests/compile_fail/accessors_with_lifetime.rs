//! Test that a struct with a lifetime parameter is rejected.

use fieldlens::Accessors;

#[derive(Accessors)]
struct View<'a> {
    pub text: &'a str,
}

fn main() {}

//! Compile-fail tests for `#[derive(Accessors)]`.
//!
//! These tests verify that malformed input is rejected at compile time
//! with an error spanned on the offending item.
//!
//! Note: trybuild tests use #[test] as an exception because
//! trybuild's standard usage pattern requires it.

#![cfg(feature = "derive")]

#[test]
fn derive_compile_fail_tests() {
    let test_cases = trybuild::TestCases::new();
    test_cases.compile_fail("tests/compile_fail/accessors_*.rs");
}

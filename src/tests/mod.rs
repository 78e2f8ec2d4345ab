//! Cross-module test suites

pub mod test_utils;

mod overflow_tests;

//! Shared helpers for the jsondb integration tests.

pub mod test_util;

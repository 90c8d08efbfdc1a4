//! End-to-end integration tests for the Bistro workspace.
//!
//! All tests live under `tests/`; this crate has no runtime code.

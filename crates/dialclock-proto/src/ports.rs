//! Port definitions for the environment the clock widget depends on.
//!
//! Higher level crates read wall-clock time through these traits instead of
//! calling `chrono::Local::now` directly, so the widget can be driven by a
//! fixed instant in tests.

pub mod time_source;

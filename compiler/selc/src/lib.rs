//! Selang scanner driver.
//!
//! Library half of the `se` binary. Command implementations write to
//! injected handles so tests can capture their output; the binary wires
//! them to stdout/stderr.

pub mod commands;

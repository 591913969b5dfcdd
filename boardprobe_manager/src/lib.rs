//! boardprobe Manager Library
//!
//! Command implementations behind the `boardprobe` binary.

pub mod commands;

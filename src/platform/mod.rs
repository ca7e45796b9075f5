// Platkit - platform/mod.rs
//
// Platform abstraction layer: allocation, clocks, files, diagnostics, config.
// Dependencies: standard library, libc, chrono, directories, toml.
// Must NOT depend on: core.

pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod fs;
pub mod memory;

// Platkit - core/mod.rs
//
// Caller-facing helpers built on the platform layer: strings, random
// numbers, numeric parsing, timers.
// Dependencies: util, platform. Must NOT depend on the binary.

pub mod numeric;
pub mod random;
pub mod strings;
pub mod timer;

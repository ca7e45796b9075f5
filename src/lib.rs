// Platkit - lib.rs
//
// Library entry point. The binary in `main.rs` is a thin CLI over these
// modules.

pub mod core;
pub mod platform;
pub mod util;

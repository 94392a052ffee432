//! Library crate root: address/token resolution, profiles, and the CLI surface.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod client;
pub mod config;

// Path: crates/types/src/app/mod.rs
//! Core application-level data structures.

mod content;
mod identity;

pub use content::*;
pub use identity::*;

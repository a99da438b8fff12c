//! Configuration sources, lowest to highest precedence.

pub mod env;
pub mod explicit_file;
pub mod global_file;

//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod fill;
pub mod render;
pub mod schema;
pub mod trace;
pub mod validate;

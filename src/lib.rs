//! Coompo: declarative components with validated properties
//!
//! Components declare their properties once ([`schema::PropertySchema`]);
//! each mounted [`core::ComponentInstance`] runs every property write
//! through a validate-then-notify pipeline and renders HTML from its
//! current state.

pub mod app;
pub mod cli;
pub mod core;
pub mod schema;

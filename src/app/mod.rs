//! The sample application: a sign-up form with inline error messages
//!
//! Validation hooks copy each property's errors into a [`FormState`] owned
//! by the application; the form renders its fields and, below each one, an
//! `error` sub-component per message.

pub mod error;
pub mod form;
pub mod state;

pub use error::{error_component, errors_to_components};
pub use form::{form_component, FormApp};
pub use state::FormState;

//! Core module - components, instances, events, and mounting

pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod instance;
pub mod mount;
pub mod value;

pub use component::{ComponentBuilder, ComponentDefinition, Hooks, RenderFn};
pub use config::Config;
pub use error::ComponentError;
pub use events::{EventKind, Observer, PropChange, PropEvent, PropValidation};
pub use instance::{ComponentInstance, PropertyState};
pub use mount::{compose, MemorySurface, Mounted, Surface, WriterSurface};
pub use value::{value_text, Value};

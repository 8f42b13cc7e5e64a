//! Kernel for the bookshelf service: settings, module trait and registry.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, SchemaDefinition};
pub use registry::ModuleRegistry;

//! Service layer tying the storefront model metadata to a store.

mod accessor;
mod registry;

pub use accessor::EntityAccessor;
pub use registry::{CustomerLocation, ModelRegistry, RegistryError, RegistryResult};

//! Shared fixtures for in-memory storefront integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use storefront_admin::storefront::{
    adapters::memory::InMemoryStorefront, services::ModelRegistry,
};

/// Registry type used across the in-memory tests.
pub type MemoryRegistry = ModelRegistry<InMemoryStorefront, DefaultClock>;

/// Provides an empty registry over a fresh in-memory store.
#[fixture]
pub fn registry() -> MemoryRegistry {
    ModelRegistry::new(Arc::new(InMemoryStorefront::new()), Arc::new(DefaultClock))
}

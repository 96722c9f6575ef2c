//! In-memory storefront store for tests and local experiments.

mod store;

pub use store::InMemoryStorefront;

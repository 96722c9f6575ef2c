//! `PostgreSQL` adapters for the storefront tables.

mod models;
mod repositories;
mod schema;
mod store;

pub use store::{PostgresStorefront, StorefrontPgPool, connect_pool};

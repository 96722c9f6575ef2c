//! Storefront model registry.
//!
//! Declares the six storefront entities (countries, cities, addresses,
//! customers, staff and payments), their foreign-key associations, and the
//! typed accessors used to read and write them. The module follows the
//! hexagonal layout used across the crate:
//!
//! - Domain types and model metadata in [`domain`]
//! - Persistence contracts in [`ports`]
//! - `PostgreSQL` and in-memory implementations in [`adapters`]
//! - The [`services::ModelRegistry`] that ties them together

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

//! Adapter implementations for storefront persistence.

pub mod memory;
pub mod postgres;

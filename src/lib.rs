//! Storefront admin: an admin agent and HTTP shell over the storefront
//! `PostgreSQL` schema.
//!
//! # Architecture
//!
//! The storefront model follows hexagonal architecture principles:
//!
//! - **Domain**: entities, drafts and model metadata with no infrastructure
//!   dependencies
//! - **Ports**: repository traits the services are written against
//! - **Adapters**: `PostgreSQL` (Diesel) and in-memory stores
//!
//! # Modules
//!
//! - [`storefront`]: the six entities, their associations and the model registry
//! - [`datasource`]: name-addressed JSON access for the admin agent
//! - [`agent`]: the admin agent routes and remote synchronisation
//! - [`server`]: liveness route, storefront pages and interrupt handling
//! - [`config`], [`telemetry`] and [`app`]: process wiring

pub mod agent;
pub mod app;
pub mod config;
pub mod datasource;
pub mod server;
pub mod storefront;
pub mod telemetry;

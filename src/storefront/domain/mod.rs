//! Domain model for the storefront schema.
//!
//! Every entity carries its foreign keys as explicit typed fields and
//! declares the association through [`BelongsTo`], so relationship traversal
//! is a lookup by key rather than an implicit association object. Drafts
//! carry the caller-supplied fields of a row before the database assigns its
//! primary key.

mod address;
mod city;
mod country;
mod customer;
mod entity;
mod error;
mod ids;
mod model;
mod payment;
mod staff;
mod text;

pub use address::{Address, AddressDraft, PersistedAddress};
pub use city::{City, CityDraft};
pub use country::{Country, CountryDraft};
pub use customer::{Customer, CustomerDraft, PersistedCustomer};
pub use entity::{BelongsTo, Entity, EntityDraft, EntityKey, Reference};
pub use error::{ParseAmountError, ParseEntityKindError, StorefrontDomainError};
pub use ids::{AddressId, CityId, CountryId, CustomerId, PaymentId, StaffId};
pub use model::{Association, EntityKind, FieldDefinition, FieldType, ModelDefinition};
pub use payment::{Amount, CardDetails, Payment, PaymentDraft};
pub use staff::{PersistedStaff, Staff, StaffDraft};

//! Traits shared by every storefront entity.

use super::{EntityKind, StorefrontDomainError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::hash::Hash;

/// Typed primary key of an entity.
pub trait EntityKey:
    Copy + fmt::Debug + fmt::Display + Eq + Ord + Hash + Send + Sync + 'static
{
    /// Wraps a raw `int4` key.
    fn from_raw(raw: i32) -> Self;

    /// Returns the raw `int4` key.
    fn raw(self) -> i32;
}

/// A foreign-key value pointing at a row of another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Entity the key points at.
    pub kind: EntityKind,
    /// Raw primary key of the referenced row.
    pub id: i32,
}

impl Reference {
    /// Creates a reference to `kind` with primary key `id`.
    #[must_use]
    pub fn to<K: EntityKey>(kind: EntityKind, id: K) -> Self {
        Self { kind, id: id.raw() }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Caller-supplied fields of a row, before a primary key is assigned.
pub trait EntityDraft: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// Trims text fields and checks the domain rules.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontDomainError`] when a required field is blank or a
    /// value is malformed.
    fn normalised(self) -> Result<Self, StorefrontDomainError>;

    /// Foreign keys the draft would store.
    fn references(&self) -> Vec<Reference>;
}

/// A persisted storefront row.
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + Send + Sync + 'static {
    /// Primary-key type.
    type Id: EntityKey;
    /// Draft type used to create and revise rows.
    type Draft: EntityDraft;

    /// Which of the six storefront entities this is.
    const KIND: EntityKind;

    /// Returns the primary key.
    fn id(&self) -> Self::Id;

    /// Builds a row from a validated draft and its assigned key.
    fn from_draft(id: Self::Id, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Replaces the mutable fields with those of `draft`.
    fn revise(&mut self, draft: Self::Draft, now: DateTime<Utc>);

    /// Timestamp used for "most recent first" listings.
    fn recency(&self) -> DateTime<Utc>;

    /// Foreign keys stored on this row.
    fn references(&self) -> Vec<Reference>;
}

/// Declares that `Self` stores a foreign key to `T`.
pub trait BelongsTo<T: Entity>: Entity {
    /// Returns the key of the owning row.
    fn parent_id(&self) -> T::Id;
}

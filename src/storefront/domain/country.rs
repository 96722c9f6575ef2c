//! Country rows.

use super::{CountryId, Entity, EntityDraft, EntityKind, Reference, StorefrontDomainError, text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `country` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    id: CountryId,
    name: String,
    last_update: DateTime<Utc>,
}

/// Fields supplied when creating or revising a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDraft {
    /// Country name.
    pub name: String,
}

impl CountryDraft {
    /// Creates a draft with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl EntityDraft for CountryDraft {
    fn normalised(self) -> Result<Self, StorefrontDomainError> {
        Ok(Self {
            name: text::required("country name", &self.name)?,
        })
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

impl Country {
    /// Reconstructs a country from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: CountryId, name: String, last_update: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            last_update,
        }
    }

    /// Returns the country name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

impl Entity for Country {
    type Id = CountryId;
    type Draft = CountryDraft;

    const KIND: EntityKind = EntityKind::Country;

    fn id(&self) -> CountryId {
        self.id
    }

    fn from_draft(id: CountryId, draft: CountryDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            last_update: now,
        }
    }

    fn revise(&mut self, draft: CountryDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.last_update = now;
    }

    fn recency(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

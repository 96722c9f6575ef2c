//! City rows.

use super::{
    BelongsTo, CityId, Country, CountryId, Entity, EntityDraft, EntityKind, Reference,
    StorefrontDomainError, text,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `city` table. Each city belongs to one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    id: CityId,
    name: String,
    country_id: CountryId,
    last_update: DateTime<Utc>,
}

/// Fields supplied when creating or revising a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDraft {
    /// City name.
    pub name: String,
    /// Owning country.
    pub country_id: CountryId,
}

impl CityDraft {
    /// Creates a draft for a city in `country_id`.
    #[must_use]
    pub fn new(name: impl Into<String>, country_id: CountryId) -> Self {
        Self {
            name: name.into(),
            country_id,
        }
    }
}

impl EntityDraft for CityDraft {
    fn normalised(self) -> Result<Self, StorefrontDomainError> {
        Ok(Self {
            name: text::required("city name", &self.name)?,
            country_id: self.country_id,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::Country, self.country_id)]
    }
}

impl City {
    /// Reconstructs a city from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: CityId,
        name: String,
        country_id: CountryId,
        last_update: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            country_id,
            last_update,
        }
    }

    /// Returns the city name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning country key.
    #[must_use]
    pub const fn country_id(&self) -> CountryId {
        self.country_id
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

impl Entity for City {
    type Id = CityId;
    type Draft = CityDraft;

    const KIND: EntityKind = EntityKind::City;

    fn id(&self) -> CityId {
        self.id
    }

    fn from_draft(id: CityId, draft: CityDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            country_id: draft.country_id,
            last_update: now,
        }
    }

    fn revise(&mut self, draft: CityDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.country_id = draft.country_id;
        self.last_update = now;
    }

    fn recency(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::Country, self.country_id)]
    }
}

impl BelongsTo<Country> for City {
    fn parent_id(&self) -> CountryId {
        self.country_id
    }
}

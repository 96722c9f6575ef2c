//! Address rows.

use super::{
    AddressId, BelongsTo, City, CityId, Entity, EntityDraft, EntityKind, Reference,
    StorefrontDomainError, text,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `address` table. Each address belongs to one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    id: AddressId,
    line1: String,
    line2: Option<String>,
    district: String,
    city_id: CityId,
    postal_code: Option<String>,
    phone: String,
    last_update: DateTime<Utc>,
}

/// Fields supplied when creating or revising an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDraft {
    /// First address line (`address` column).
    pub line1: String,
    /// Optional second address line (`address2` column).
    #[serde(default)]
    pub line2: Option<String>,
    /// District or region.
    pub district: String,
    /// Owning city.
    pub city_id: CityId,
    /// Optional postal code.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Contact phone number.
    pub phone: String,
}

impl EntityDraft for AddressDraft {
    fn normalised(self) -> Result<Self, StorefrontDomainError> {
        Ok(Self {
            line1: text::required("address", &self.line1)?,
            line2: text::optional(self.line2),
            district: text::required("district", &self.district)?,
            city_id: self.city_id,
            postal_code: text::optional(self.postal_code),
            phone: text::required("phone", &self.phone)?,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::City, self.city_id)]
    }
}

/// Parameter object for reconstructing a persisted address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAddress {
    /// Persisted primary key.
    pub id: AddressId,
    /// Persisted draft fields.
    pub fields: AddressDraft,
    /// Persisted modification timestamp.
    pub last_update: DateTime<Utc>,
}

impl Address {
    /// Reconstructs an address from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAddress) -> Self {
        Self::from_draft(data.id, data.fields, data.last_update)
    }

    /// Returns the first address line.
    #[must_use]
    pub fn line1(&self) -> &str {
        &self.line1
    }

    /// Returns the second address line, if any.
    #[must_use]
    pub fn line2(&self) -> Option<&str> {
        self.line2.as_deref()
    }

    /// Returns the district.
    #[must_use]
    pub fn district(&self) -> &str {
        &self.district
    }

    /// Returns the owning city key.
    #[must_use]
    pub const fn city_id(&self) -> CityId {
        self.city_id
    }

    /// Returns the postal code, if any.
    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

impl Entity for Address {
    type Id = AddressId;
    type Draft = AddressDraft;

    const KIND: EntityKind = EntityKind::Address;

    fn id(&self) -> AddressId {
        self.id
    }

    fn from_draft(id: AddressId, draft: AddressDraft, now: DateTime<Utc>) -> Self {
        let AddressDraft {
            line1,
            line2,
            district,
            city_id,
            postal_code,
            phone,
        } = draft;
        Self {
            id,
            line1,
            line2,
            district,
            city_id,
            postal_code,
            phone,
            last_update: now,
        }
    }

    fn revise(&mut self, draft: AddressDraft, now: DateTime<Utc>) {
        *self = Self::from_draft(self.id, draft, now);
    }

    fn recency(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::City, self.city_id)]
    }
}

impl BelongsTo<City> for Address {
    fn parent_id(&self) -> CityId {
        self.city_id
    }
}

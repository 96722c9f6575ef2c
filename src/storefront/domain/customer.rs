//! Customer rows.

use super::{
    Address, AddressId, BelongsTo, CustomerId, Entity, EntityDraft, EntityKind, Reference,
    StorefrontDomainError, text,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `customer` table. Each customer belongs to one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: CustomerId,
    store_id: i32,
    address_id: AddressId,
    first_name: String,
    last_name: String,
    email: Option<String>,
    ssn: Option<String>,
    active: bool,
    create_date: NaiveDate,
    last_update: DateTime<Utc>,
}

const fn active_by_default() -> bool {
    true
}

/// Fields supplied when creating or revising a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    /// Store the customer is attached to.
    pub store_id: i32,
    /// Customer address.
    pub address_id: AddressId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Social security number.
    #[serde(default)]
    pub ssn: Option<String>,
    /// Whether the customer account is active.
    #[serde(default = "active_by_default")]
    pub active: bool,
}

impl CustomerDraft {
    /// Creates an active customer draft without email or SSN.
    #[must_use]
    pub fn new(
        store_id: i32,
        address_id: AddressId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            store_id,
            address_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            ssn: None,
            active: true,
        }
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl EntityDraft for CustomerDraft {
    fn normalised(self) -> Result<Self, StorefrontDomainError> {
        Ok(Self {
            store_id: self.store_id,
            address_id: self.address_id,
            first_name: text::required("first name", &self.first_name)?,
            last_name: text::required("last name", &self.last_name)?,
            email: text::optional_email(self.email)?,
            ssn: text::optional(self.ssn),
            active: self.active,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::Address, self.address_id)]
    }
}

/// Parameter object for reconstructing a persisted customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCustomer {
    /// Persisted primary key.
    pub id: CustomerId,
    /// Persisted draft fields.
    pub fields: CustomerDraft,
    /// Persisted creation date.
    pub create_date: NaiveDate,
    /// Persisted modification timestamp.
    pub last_update: DateTime<Utc>,
}

impl Customer {
    /// Reconstructs a customer from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCustomer) -> Self {
        let mut customer = Self::from_draft(data.id, data.fields, data.last_update);
        customer.create_date = data.create_date;
        customer
    }

    /// Returns the store key.
    #[must_use]
    pub const fn store_id(&self) -> i32 {
        self.store_id
    }

    /// Returns the address key.
    #[must_use]
    pub const fn address_id(&self) -> AddressId {
        self.address_id
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the contact email, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the social security number, if recorded.
    #[must_use]
    pub fn ssn(&self) -> Option<&str> {
        self.ssn.as_deref()
    }

    /// Returns whether the customer is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation date.
    #[must_use]
    pub const fn create_date(&self) -> NaiveDate {
        self.create_date
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

impl Entity for Customer {
    type Id = CustomerId;
    type Draft = CustomerDraft;

    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> CustomerId {
        self.id
    }

    fn from_draft(id: CustomerId, draft: CustomerDraft, now: DateTime<Utc>) -> Self {
        let CustomerDraft {
            store_id,
            address_id,
            first_name,
            last_name,
            email,
            ssn,
            active,
        } = draft;
        Self {
            id,
            store_id,
            address_id,
            first_name,
            last_name,
            email,
            ssn,
            active,
            create_date: now.date_naive(),
            last_update: now,
        }
    }

    fn revise(&mut self, draft: CustomerDraft, now: DateTime<Utc>) {
        let create_date = self.create_date;
        *self = Self::from_draft(self.id, draft, now);
        self.create_date = create_date;
    }

    fn recency(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::Address, self.address_id)]
    }
}

impl BelongsTo<Address> for Customer {
    fn parent_id(&self) -> AddressId {
        self.address_id
    }
}

//! Staff rows.
//!
//! Staff credentials are stored but never serialised: the password field is
//! skipped on output so it cannot leak through the admin routes.

use super::{
    Address, AddressId, BelongsTo, Entity, EntityDraft, EntityKind, Reference, StaffId,
    StorefrontDomainError, text,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `staff` table. Each staff member belongs to one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Staff {
    id: StaffId,
    store_id: i32,
    address_id: AddressId,
    first_name: String,
    last_name: String,
    email: Option<String>,
    username: String,
    #[serde(skip_serializing)]
    password: Option<String>,
    active: bool,
    last_update: DateTime<Utc>,
}

const fn active_by_default() -> bool {
    true
}

/// Fields supplied when creating or revising a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffDraft {
    /// Store the staff member works at.
    pub store_id: i32,
    /// Staff address.
    pub address_id: AddressId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Login name.
    pub username: String,
    /// Stored credential.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Whether the staff account is active.
    #[serde(default = "active_by_default")]
    pub active: bool,
}

impl StaffDraft {
    /// Creates an active staff draft without email or password.
    #[must_use]
    pub fn new(
        store_id: i32,
        address_id: AddressId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            store_id,
            address_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            username: username.into(),
            password: None,
            active: true,
        }
    }

    /// Sets the stored credential.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

impl EntityDraft for StaffDraft {
    fn normalised(self) -> Result<Self, StorefrontDomainError> {
        Ok(Self {
            store_id: self.store_id,
            address_id: self.address_id,
            first_name: text::required("first name", &self.first_name)?,
            last_name: text::required("last name", &self.last_name)?,
            email: text::optional_email(self.email)?,
            username: text::required("username", &self.username)?,
            // Credentials are kept verbatim.
            password: self.password.filter(|value| !value.is_empty()),
            active: self.active,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::Address, self.address_id)]
    }
}

/// Parameter object for reconstructing a persisted staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStaff {
    /// Persisted primary key.
    pub id: StaffId,
    /// Persisted draft fields.
    pub fields: StaffDraft,
    /// Persisted modification timestamp.
    pub last_update: DateTime<Utc>,
}

impl Staff {
    /// Reconstructs a staff member from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStaff) -> Self {
        Self::from_draft(data.id, data.fields, data.last_update)
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

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the stored credential, if any.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns whether the staff member is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

impl Entity for Staff {
    type Id = StaffId;
    type Draft = StaffDraft;

    const KIND: EntityKind = EntityKind::Staff;

    fn id(&self) -> StaffId {
        self.id
    }

    fn from_draft(id: StaffId, draft: StaffDraft, now: DateTime<Utc>) -> Self {
        let StaffDraft {
            store_id,
            address_id,
            first_name,
            last_name,
            email,
            username,
            password,
            active,
        } = draft;
        Self {
            id,
            store_id,
            address_id,
            first_name,
            last_name,
            email,
            username,
            password,
            active,
            last_update: now,
        }
    }

    fn revise(&mut self, draft: StaffDraft, now: DateTime<Utc>) {
        // A revision without a password keeps the stored one.
        let previous_password = self.password.take();
        *self = Self::from_draft(self.id, draft, now);
        if self.password.is_none() {
            self.password = previous_password;
        }
    }

    fn recency(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to(EntityKind::Address, self.address_id)]
    }
}

impl BelongsTo<Address> for Staff {
    fn parent_id(&self) -> AddressId {
        self.address_id
    }
}

//! Declarative model metadata: tables, columns and associations.
//!
//! This is the schema description handed to the admin agent and to anything
//! else that needs to address entities by name. It mirrors the live
//! `PostgreSQL` tables one to one.

use super::ParseEntityKindError;
use serde::Serialize;
use std::fmt;

/// The six storefront entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// `country` table.
    Country,
    /// `city` table.
    City,
    /// `address` table.
    Address,
    /// `customer` table.
    Customer,
    /// `staff` table.
    Staff,
    /// `payment` table.
    Payment,
}

impl EntityKind {
    /// All entities, parents before children.
    pub const ALL: [Self; 6] = [
        Self::Country,
        Self::City,
        Self::Address,
        Self::Customer,
        Self::Staff,
        Self::Payment,
    ];

    /// Returns the entity (and table) name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::City => "city",
            Self::Address => "address",
            Self::Customer => "customer",
            Self::Staff => "staff",
            Self::Payment => "payment",
        }
    }

    /// Returns the model definition of this entity.
    #[must_use]
    pub const fn definition(self) -> &'static ModelDefinition {
        match self {
            Self::Country => &COUNTRY,
            Self::City => &CITY,
            Self::Address => &ADDRESS,
            Self::Customer => &CUSTOMER,
            Self::Staff => &STAFF,
            Self::Payment => &PAYMENT,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EntityKind {
    type Error = ParseEntityKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseEntityKindError(value.to_owned()))
    }
}

/// Column value type as declared in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// `int4`.
    Integer,
    /// `text`.
    Text,
    /// `bool`.
    Boolean,
    /// `date`.
    Date,
    /// `timestamptz`.
    Timestamp,
    /// `numeric(5,2)`.
    Decimal,
}

/// A single declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Field name used in serialised rows.
    pub name: &'static str,
    /// Column name in the table.
    pub column: &'static str,
    /// Declared value type.
    pub field_type: FieldType,
    /// Whether the column accepts `NULL`.
    pub nullable: bool,
    /// Whether the value must stay inside the process (credentials).
    pub sensitive: bool,
}

impl FieldDefinition {
    const fn new(name: &'static str, column: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            column,
            field_type,
            nullable: false,
            sensitive: false,
        }
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// A `belongs_to` association: the owner stores `foreign_key` pointing at
/// the primary key of `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Association {
    /// Relation name used for traversal.
    pub name: &'static str,
    /// Foreign-key field on the owning entity.
    pub foreign_key: &'static str,
    /// Referenced entity.
    pub target: EntityKind,
}

/// Table-level description of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDefinition {
    /// Entity described.
    pub kind: EntityKind,
    /// Table name.
    pub table: &'static str,
    /// Primary-key column.
    pub primary_key: &'static str,
    /// Declared columns, primary key first.
    pub fields: &'static [FieldDefinition],
    /// Outgoing associations.
    pub associations: &'static [Association],
}

impl ModelDefinition {
    /// Finds an association by relation name.
    #[must_use]
    pub fn association(&self, name: &str) -> Option<&'static Association> {
        self.associations.iter().find(|assoc| assoc.name == name)
    }
}

use FieldType::{Boolean, Date, Decimal, Integer, Text, Timestamp};

static COUNTRY: ModelDefinition = ModelDefinition {
    kind: EntityKind::Country,
    table: "country",
    primary_key: "country_id",
    fields: &[
        FieldDefinition::new("id", "country_id", Integer),
        FieldDefinition::new("name", "country", Text),
        FieldDefinition::new("last_update", "last_update", Timestamp),
    ],
    associations: &[],
};

static CITY: ModelDefinition = ModelDefinition {
    kind: EntityKind::City,
    table: "city",
    primary_key: "city_id",
    fields: &[
        FieldDefinition::new("id", "city_id", Integer),
        FieldDefinition::new("name", "city", Text),
        FieldDefinition::new("country_id", "country_id", Integer),
        FieldDefinition::new("last_update", "last_update", Timestamp),
    ],
    associations: &[Association {
        name: "country",
        foreign_key: "country_id",
        target: EntityKind::Country,
    }],
};

static ADDRESS: ModelDefinition = ModelDefinition {
    kind: EntityKind::Address,
    table: "address",
    primary_key: "address_id",
    fields: &[
        FieldDefinition::new("id", "address_id", Integer),
        FieldDefinition::new("line1", "address", Text),
        FieldDefinition::new("line2", "address2", Text).nullable(),
        FieldDefinition::new("district", "district", Text),
        FieldDefinition::new("city_id", "city_id", Integer),
        FieldDefinition::new("postal_code", "postal_code", Text).nullable(),
        FieldDefinition::new("phone", "phone", Text),
        FieldDefinition::new("last_update", "last_update", Timestamp),
    ],
    associations: &[Association {
        name: "city",
        foreign_key: "city_id",
        target: EntityKind::City,
    }],
};

static CUSTOMER: ModelDefinition = ModelDefinition {
    kind: EntityKind::Customer,
    table: "customer",
    primary_key: "customer_id",
    fields: &[
        FieldDefinition::new("id", "customer_id", Integer),
        FieldDefinition::new("store_id", "store_id", Integer),
        FieldDefinition::new("address_id", "address_id", Integer),
        FieldDefinition::new("first_name", "first_name", Text),
        FieldDefinition::new("last_name", "last_name", Text),
        FieldDefinition::new("email", "email", Text).nullable(),
        FieldDefinition::new("ssn", "ssn", Text).nullable(),
        FieldDefinition::new("active", "active", Boolean),
        FieldDefinition::new("create_date", "create_date", Date),
        FieldDefinition::new("last_update", "last_update", Timestamp),
    ],
    associations: &[Association {
        name: "address",
        foreign_key: "address_id",
        target: EntityKind::Address,
    }],
};

static STAFF: ModelDefinition = ModelDefinition {
    kind: EntityKind::Staff,
    table: "staff",
    primary_key: "staff_id",
    fields: &[
        FieldDefinition::new("id", "staff_id", Integer),
        FieldDefinition::new("store_id", "store_id", Integer),
        FieldDefinition::new("address_id", "address_id", Integer),
        FieldDefinition::new("first_name", "first_name", Text),
        FieldDefinition::new("last_name", "last_name", Text),
        FieldDefinition::new("email", "email", Text).nullable(),
        FieldDefinition::new("username", "username", Text),
        FieldDefinition::new("password", "password", Text)
            .nullable()
            .sensitive(),
        FieldDefinition::new("active", "active", Boolean),
        FieldDefinition::new("last_update", "last_update", Timestamp),
    ],
    associations: &[Association {
        name: "address",
        foreign_key: "address_id",
        target: EntityKind::Address,
    }],
};

static PAYMENT: ModelDefinition = ModelDefinition {
    kind: EntityKind::Payment,
    table: "payment",
    primary_key: "payment_id",
    fields: &[
        FieldDefinition::new("id", "payment_id", Integer),
        FieldDefinition::new("amount", "amount", Decimal),
        FieldDefinition::new("customer_id", "customer_id", Integer),
        FieldDefinition::new("staff_id", "staff_id", Integer),
        FieldDefinition::new("rental_id", "rental_id", Integer).nullable(),
        FieldDefinition::new("cc_number", "cc_number", Text).nullable(),
        FieldDefinition::new("cc_expiration", "cc_expiration", Text).nullable(),
        FieldDefinition::new("cc_cvv", "cc_cvv", Text).nullable(),
        FieldDefinition::new("payment_date", "payment_date", Timestamp),
    ],
    associations: &[
        Association {
            name: "customer",
            foreign_key: "customer_id",
            target: EntityKind::Customer,
        },
        Association {
            name: "staff",
            foreign_key: "staff_id",
            target: EntityKind::Staff,
        },
    ],
};

//! The schema document ("apimap") published to the remote service.

use crate::storefront::domain::{FieldDefinition, FieldType, ModelDefinition};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Schema of every collection the agent serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Apimap {
    /// Collections, sorted by name.
    pub collections: Vec<ApimapCollection>,
    /// Agent metadata.
    pub meta: ApimapMeta,
}

/// One collection of the apimap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApimapCollection {
    /// Collection name.
    pub name: String,
    /// Primary-key field.
    pub primary_key: String,
    /// Exposed fields. Sensitive columns are left out.
    pub fields: Vec<ApimapField>,
}

/// One field of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApimapField {
    /// Field name as serialised in rows.
    pub field: String,
    /// Admin-side type name.
    #[serde(rename = "type")]
    pub field_type: &'static str,
    /// Whether a value must be supplied.
    pub is_required: bool,
    /// `collection.id` target when the field is a foreign key.
    pub reference: Option<String>,
}

/// Metadata describing the agent that produced the apimap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApimapMeta {
    /// Agent name.
    pub liana: &'static str,
    /// Agent version.
    pub liana_version: &'static str,
    /// `production` or `development`.
    pub environment: &'static str,
    /// SHA-256 of the serialised collections, hex encoded.
    pub schema_file_hash: String,
}

const fn admin_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Integer | FieldType::Decimal => "Number",
        FieldType::Text => "String",
        FieldType::Boolean => "Boolean",
        FieldType::Date => "Dateonly",
        FieldType::Timestamp => "Date",
    }
}

// Keys and timestamps are assigned by the store.
fn is_required(field: &FieldDefinition) -> bool {
    !field.nullable
        && !matches!(field.field_type, FieldType::Date | FieldType::Timestamp)
        && field.name != "id"
}

fn collection_of(model: &ModelDefinition) -> ApimapCollection {
    let fields = model
        .fields
        .iter()
        .filter(|field| !field.sensitive)
        .map(|field| ApimapField {
            field: field.name.to_owned(),
            field_type: admin_type(field.field_type),
            is_required: is_required(field),
            reference: model
                .associations
                .iter()
                .find(|assoc| assoc.foreign_key == field.name)
                .map(|assoc| format!("{}.id", assoc.target)),
        })
        .collect();
    ApimapCollection {
        name: model.table.to_owned(),
        primary_key: "id".to_owned(),
        fields,
    }
}

impl Apimap {
    /// Builds the apimap of `models`.
    #[must_use]
    pub fn from_models(models: &[ModelDefinition], is_production: bool) -> Self {
        let mut collections: Vec<_> = models.iter().map(collection_of).collect();
        collections.sort_by(|left, right| left.name.cmp(&right.name));
        let schema_file_hash = schema_hash(&collections);
        Self {
            collections,
            meta: ApimapMeta {
                liana: env!("CARGO_PKG_NAME"),
                liana_version: env!("CARGO_PKG_VERSION"),
                environment: if is_production {
                    "production"
                } else {
                    "development"
                },
                schema_file_hash,
            },
        }
    }

    /// Finds a collection by name.
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&ApimapCollection> {
        self.collections
            .iter()
            .find(|collection| collection.name == name)
    }
}

fn schema_hash(collections: &[ApimapCollection]) -> String {
    let mut hasher = Sha256::new();
    for collection in collections {
        hasher.update(collection.name.as_bytes());
        for field in &collection.fields {
            hasher.update(b"\0");
            hasher.update(field.field.as_bytes());
            hasher.update(field.field_type.as_bytes());
        }
        hasher.update(b"\n");
    }
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

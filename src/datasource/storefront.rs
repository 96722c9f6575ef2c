//! [`Datasource`] implementation over the storefront model registry.

use super::{Datasource, DatasourceError, DatasourceResult};
use crate::storefront::{
    domain::{
        Address, BelongsTo, City, Country, Customer, Entity, EntityKey, EntityKind,
        ModelDefinition, Payment, Staff,
    },
    ports::{EntityRepository, ListQuery, StorefrontStore},
    services::ModelRegistry,
};
use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;

/// Serves the six storefront tables as admin collections named after their
/// tables.
pub struct StorefrontDatasource<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync,
{
    registry: ModelRegistry<S, C>,
}

impl<S, C> StorefrontDatasource<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync,
{
    /// Wraps a model registry.
    #[must_use]
    pub const fn new(registry: ModelRegistry<S, C>) -> Self {
        Self { registry }
    }
}

fn kind_of(collection: &str) -> DatasourceResult<EntityKind> {
    EntityKind::try_from(collection)
        .map_err(|_| DatasourceError::UnknownCollection(collection.to_owned()))
}

fn to_json<E: Entity>(row: &E) -> DatasourceResult<Value> {
    serde_json::to_value(row).map_err(DatasourceError::serialization)
}

fn draft_from<E: Entity>(body: Value) -> DatasourceResult<E::Draft> {
    serde_json::from_value(body).map_err(DatasourceError::invalid_payload)
}

async fn list_rows<E, S, C>(
    registry: &ModelRegistry<S, C>,
    query: ListQuery,
) -> DatasourceResult<Vec<Value>>
where
    E: Entity,
    S: StorefrontStore + EntityRepository<E>,
    C: Clock + Send + Sync,
{
    let rows = registry.accessor::<E>().list(query).await?;
    rows.iter().map(to_json).collect()
}

async fn count_rows<E, S, C>(registry: &ModelRegistry<S, C>) -> DatasourceResult<u64>
where
    E: Entity,
    S: StorefrontStore + EntityRepository<E>,
    C: Clock + Send + Sync,
{
    Ok(registry.accessor::<E>().count().await?)
}

async fn get_row<E, S, C>(registry: &ModelRegistry<S, C>, id: i32) -> DatasourceResult<Value>
where
    E: Entity,
    S: StorefrontStore + EntityRepository<E>,
    C: Clock + Send + Sync,
{
    let row = registry.accessor::<E>().get(E::Id::from_raw(id)).await?;
    to_json(&row)
}

async fn create_row<E, S, C>(registry: &ModelRegistry<S, C>, body: Value) -> DatasourceResult<Value>
where
    E: Entity,
    S: StorefrontStore + EntityRepository<E>,
    C: Clock + Send + Sync,
{
    let draft = draft_from::<E>(body)?;
    let row = registry.accessor::<E>().create(draft).await?;
    to_json(&row)
}

async fn update_row<E, S, C>(
    registry: &ModelRegistry<S, C>,
    id: i32,
    body: Value,
) -> DatasourceResult<Value>
where
    E: Entity,
    S: StorefrontStore + EntityRepository<E>,
    C: Clock + Send + Sync,
{
    let draft = draft_from::<E>(body)?;
    let row = registry
        .accessor::<E>()
        .update(E::Id::from_raw(id), draft)
        .await?;
    to_json(&row)
}

async fn delete_row<E, S, C>(registry: &ModelRegistry<S, C>, id: i32) -> DatasourceResult<()>
where
    E: Entity,
    S: StorefrontStore + EntityRepository<E>,
    C: Clock + Send + Sync,
{
    Ok(registry.accessor::<E>().delete(E::Id::from_raw(id)).await?)
}

async fn parent_row<P, Ch, S, C>(registry: &ModelRegistry<S, C>, id: i32) -> DatasourceResult<Value>
where
    P: Entity,
    Ch: BelongsTo<P>,
    S: StorefrontStore + EntityRepository<P> + EntityRepository<Ch>,
    C: Clock + Send + Sync,
{
    let child = registry.accessor::<Ch>().get(Ch::Id::from_raw(id)).await?;
    let parent: P = registry.resolve(&child).await?;
    to_json(&parent)
}

/// Expands to a match that calls `$handler::<Entity, S, C>` for the entity
/// named by `$kind`.
macro_rules! dispatch {
    ($kind:expr, $handler:ident($($arg:expr),*)) => {
        match $kind {
            EntityKind::Country => $handler::<Country, S, C>($($arg),*).await,
            EntityKind::City => $handler::<City, S, C>($($arg),*).await,
            EntityKind::Address => $handler::<Address, S, C>($($arg),*).await,
            EntityKind::Customer => $handler::<Customer, S, C>($($arg),*).await,
            EntityKind::Staff => $handler::<Staff, S, C>($($arg),*).await,
            EntityKind::Payment => $handler::<Payment, S, C>($($arg),*).await,
        }
    };
}

#[async_trait]
impl<S, C> Datasource for StorefrontDatasource<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    fn collections(&self) -> Vec<ModelDefinition> {
        self.registry.models().into_values().collect()
    }

    async fn list(&self, collection: &str, query: ListQuery) -> DatasourceResult<Vec<Value>> {
        let kind = kind_of(collection)?;
        dispatch!(kind, list_rows(&self.registry, query))
    }

    async fn count(&self, collection: &str) -> DatasourceResult<u64> {
        let kind = kind_of(collection)?;
        dispatch!(kind, count_rows(&self.registry))
    }

    async fn get(&self, collection: &str, id: i32) -> DatasourceResult<Value> {
        let kind = kind_of(collection)?;
        dispatch!(kind, get_row(&self.registry, id))
    }

    async fn create(&self, collection: &str, body: Value) -> DatasourceResult<Value> {
        let kind = kind_of(collection)?;
        dispatch!(kind, create_row(&self.registry, body))
    }

    async fn update(&self, collection: &str, id: i32, body: Value) -> DatasourceResult<Value> {
        let kind = kind_of(collection)?;
        dispatch!(kind, update_row(&self.registry, id, body))
    }

    async fn delete(&self, collection: &str, id: i32) -> DatasourceResult<()> {
        let kind = kind_of(collection)?;
        dispatch!(kind, delete_row(&self.registry, id))
    }

    async fn related(
        &self,
        collection: &str,
        id: i32,
        relation: &str,
    ) -> DatasourceResult<Value> {
        let kind = kind_of(collection)?;
        let unknown = || DatasourceError::UnknownRelation {
            collection: collection.to_owned(),
            relation: relation.to_owned(),
        };
        let association = kind.definition().association(relation).ok_or_else(unknown)?;
        let registry = &self.registry;
        match (kind, association.target) {
            (EntityKind::City, EntityKind::Country) => {
                parent_row::<Country, City, S, C>(registry, id).await
            }
            (EntityKind::Address, EntityKind::City) => {
                parent_row::<City, Address, S, C>(registry, id).await
            }
            (EntityKind::Customer, EntityKind::Address) => {
                parent_row::<Address, Customer, S, C>(registry, id).await
            }
            (EntityKind::Staff, EntityKind::Address) => {
                parent_row::<Address, Staff, S, C>(registry, id).await
            }
            (EntityKind::Payment, EntityKind::Customer) => {
                parent_row::<Customer, Payment, S, C>(registry, id).await
            }
            (EntityKind::Payment, EntityKind::Staff) => {
                parent_row::<Staff, Payment, S, C>(registry, id).await
            }
            _ => Err(unknown()),
        }
    }
}

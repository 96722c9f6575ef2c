//! Typed read/write accessor for one storefront entity.

use super::{RegistryError, RegistryResult};
use crate::storefront::{
    domain::{Entity, EntityDraft, Reference},
    ports::{EntityRepository, ListQuery, RepositoryError},
};
use mockable::Clock;
use std::marker::PhantomData;
use std::sync::Arc;

/// Validated access to the rows of entity `E`.
///
/// Drafts are normalised before they reach the store, and every write is
/// stamped from the registry clock.
pub struct EntityAccessor<E, S, C>
where
    E: Entity,
    S: EntityRepository<E>,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    entity: PhantomData<fn() -> E>,
}

impl<E, S, C> EntityAccessor<E, S, C>
where
    E: Entity,
    S: EntityRepository<E>,
    C: Clock + Send + Sync,
{
    pub(super) const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            entity: PhantomData,
        }
    }

    /// Finds a row by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Repository`] when the lookup fails.
    pub async fn find(&self, id: E::Id) -> RegistryResult<Option<E>> {
        Ok(self.store.find(id).await?)
    }

    /// Returns the row with primary key `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] (wrapped) when no such row
    /// exists.
    pub async fn get(&self, id: E::Id) -> RegistryResult<E> {
        self.find(id).await?.ok_or_else(|| {
            RegistryError::Repository(RepositoryError::NotFound(Reference::to(E::KIND, id)))
        })
    }

    /// Returns one page of rows.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Repository`] when the query fails.
    pub async fn list(&self, query: ListQuery) -> RegistryResult<Vec<E>> {
        Ok(self.store.list(query).await?)
    }

    /// Returns the total number of rows.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Repository`] when the query fails.
    pub async fn count(&self) -> RegistryResult<u64> {
        Ok(self.store.count().await?)
    }

    /// Validates `draft` and inserts it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Domain`] when the draft is invalid and
    /// [`RegistryError::Repository`] when a foreign key dangles or the
    /// insert fails.
    pub async fn create(&self, draft: E::Draft) -> RegistryResult<E> {
        let validated = draft.normalised()?;
        Ok(self.store.insert(validated, self.clock.utc()).await?)
    }

    /// Replaces the mutable fields of row `id` with `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Domain`] when the draft is invalid and
    /// [`RegistryError::Repository`] when the row is missing, a foreign key
    /// dangles or the update fails.
    pub async fn update(&self, id: E::Id, draft: E::Draft) -> RegistryResult<E> {
        let validated = draft.normalised()?;
        let mut entity = self.get(id).await?;
        entity.revise(validated, self.clock.utc());
        self.store.update(&entity).await?;
        Ok(entity)
    }

    /// Deletes row `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Repository`] when the row is missing, still
    /// referenced, or the delete fails.
    pub async fn delete(&self, id: E::Id) -> RegistryResult<()> {
        Ok(self.store.delete(id).await?)
    }
}

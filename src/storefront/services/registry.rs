//! The storefront model registry.
//!
//! [`ModelRegistry`] hands out the declared models by name and typed
//! [`EntityAccessor`]s over the backing store, and resolves `belongs_to`
//! associations by following the stored foreign keys.

use super::EntityAccessor;
use crate::storefront::{
    domain::{
        Address, BelongsTo, City, Country, Customer, CustomerId, Entity, EntityKind,
        ModelDefinition, Payment, Reference, Staff, StorefrontDomainError,
    },
    ports::{EntityRepository, RepositoryError, StorefrontStore},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] StorefrontDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A stored foreign key points at a row that no longer exists.
    #[error("{child} points at missing {parent}")]
    DanglingReference {
        /// Row holding the foreign key.
        child: Reference,
        /// Row the key points at.
        parent: Reference,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// The address chain of a customer, from the customer up to the country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerLocation {
    /// The customer.
    pub customer: Customer,
    /// The customer's address.
    pub address: Address,
    /// The city of that address.
    pub city: City,
    /// The country of that city.
    pub country: Country,
}

/// Model registry over a storefront store.
pub struct ModelRegistry<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for ModelRegistry<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> ModelRegistry<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync,
{
    /// Creates a registry over `store`, stamping writes with `clock`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns the declared models keyed by entity name.
    #[must_use]
    pub fn models(&self) -> BTreeMap<&'static str, ModelDefinition> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| (kind.as_str(), *kind.definition()))
            .collect()
    }

    /// Returns the typed accessor for entity `E`.
    #[must_use]
    pub fn accessor<E>(&self) -> EntityAccessor<E, S, C>
    where
        E: Entity,
        S: EntityRepository<E>,
    {
        EntityAccessor::new(Arc::clone(&self.store), Arc::clone(&self.clock))
    }

    /// Accessor for the `country` table.
    #[must_use]
    pub fn countries(&self) -> EntityAccessor<Country, S, C> {
        self.accessor()
    }

    /// Accessor for the `city` table.
    #[must_use]
    pub fn cities(&self) -> EntityAccessor<City, S, C> {
        self.accessor()
    }

    /// Accessor for the `address` table.
    #[must_use]
    pub fn addresses(&self) -> EntityAccessor<Address, S, C> {
        self.accessor()
    }

    /// Accessor for the `customer` table.
    #[must_use]
    pub fn customers(&self) -> EntityAccessor<Customer, S, C> {
        self.accessor()
    }

    /// Accessor for the `staff` table.
    #[must_use]
    pub fn staff(&self) -> EntityAccessor<Staff, S, C> {
        self.accessor()
    }

    /// Accessor for the `payment` table.
    #[must_use]
    pub fn payments(&self) -> EntityAccessor<Payment, S, C> {
        self.accessor()
    }

    /// Follows the `belongs_to` association from `child` to its parent row.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DanglingReference`] when the parent row no
    /// longer exists, or [`RegistryError::Repository`] when the lookup fails.
    pub async fn resolve<P, Ch>(&self, child: &Ch) -> RegistryResult<P>
    where
        P: Entity,
        Ch: BelongsTo<P>,
        S: EntityRepository<P>,
    {
        let parent_id = child.parent_id();
        <S as EntityRepository<P>>::find(self.store.as_ref(), parent_id)
            .await?
            .ok_or_else(|| RegistryError::DanglingReference {
                child: Reference::to(Ch::KIND, child.id()),
                parent: Reference::to(P::KIND, parent_id),
            })
    }

    /// Walks customer, address, city and country for one customer.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] (wrapped) when the customer
    /// does not exist and [`RegistryError::DanglingReference`] when a link
    /// of the chain is missing.
    pub async fn customer_location(&self, id: CustomerId) -> RegistryResult<CustomerLocation> {
        let customer = self.customers().get(id).await?;
        let address: Address = self.resolve(&customer).await?;
        let city: City = self.resolve(&address).await?;
        let country: Country = self.resolve(&city).await?;
        Ok(CustomerLocation {
            customer,
            address,
            city,
            country,
        })
    }
}

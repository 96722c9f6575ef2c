//! Thread-safe in-memory implementation of every storefront repository.
//!
//! Each table draws keys from its own counter, which only grows, so a key
//! freed by a delete is never handed out again within a process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::storefront::{
    domain::{
        Address, AddressId, City, CityId, Country, CountryId, Customer, CustomerId, Entity,
        EntityDraft, EntityKey, EntityKind, Payment, PaymentId, Reference, Staff, StaffId,
    },
    ports::{EntityRepository, ListOrder, ListQuery, RepositoryError, RepositoryResult},
};

/// In-memory store holding the six storefront tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorefront {
    state: Arc<RwLock<StorefrontTables>>,
}

#[derive(Debug, Default)]
struct StorefrontTables {
    countries: BTreeMap<CountryId, Country>,
    cities: BTreeMap<CityId, City>,
    addresses: BTreeMap<AddressId, Address>,
    customers: BTreeMap<CustomerId, Customer>,
    staff: BTreeMap<StaffId, Staff>,
    payments: BTreeMap<PaymentId, Payment>,
    last_keys: BTreeMap<EntityKind, i32>,
}

impl StorefrontTables {
    fn allocate_key(&mut self, kind: EntityKind) -> i32 {
        let last = self.last_keys.entry(kind).or_insert(0);
        *last = last.saturating_add(1);
        *last
    }

    fn contains(&self, reference: Reference) -> bool {
        match reference.kind {
            EntityKind::Country => self.countries.contains_key(&CountryId::new(reference.id)),
            EntityKind::City => self.cities.contains_key(&CityId::new(reference.id)),
            EntityKind::Address => self.addresses.contains_key(&AddressId::new(reference.id)),
            EntityKind::Customer => self.customers.contains_key(&CustomerId::new(reference.id)),
            EntityKind::Staff => self.staff.contains_key(&StaffId::new(reference.id)),
            EntityKind::Payment => self.payments.contains_key(&PaymentId::new(reference.id)),
        }
    }

    fn check_references(&self, references: &[Reference]) -> RepositoryResult<()> {
        references
            .iter()
            .find(|reference| !self.contains(**reference))
            .map_or(Ok(()), |missing| {
                Err(RepositoryError::MissingReference(*missing))
            })
    }

    fn referrer_of(&self, target: Reference) -> Option<EntityKind> {
        fn points_at<E: Entity>(rows: &BTreeMap<E::Id, E>, target: Reference) -> bool {
            rows.values().any(|row| row.references().contains(&target))
        }

        [
            (EntityKind::City, points_at(&self.cities, target)),
            (EntityKind::Address, points_at(&self.addresses, target)),
            (EntityKind::Customer, points_at(&self.customers, target)),
            (EntityKind::Staff, points_at(&self.staff, target)),
            (EntityKind::Payment, points_at(&self.payments, target)),
        ]
        .into_iter()
        .find_map(|(kind, found)| found.then_some(kind))
    }
}

/// Selects the table holding `Self` inside the shared state.
trait MemoryTable: Entity {
    fn rows(tables: &StorefrontTables) -> &BTreeMap<Self::Id, Self>;
    fn rows_mut(tables: &mut StorefrontTables) -> &mut BTreeMap<Self::Id, Self>;
}

macro_rules! memory_table {
    ($entity:ty, $field:ident) => {
        impl MemoryTable for $entity {
            fn rows(tables: &StorefrontTables) -> &BTreeMap<Self::Id, Self> {
                &tables.$field
            }

            fn rows_mut(tables: &mut StorefrontTables) -> &mut BTreeMap<Self::Id, Self> {
                &mut tables.$field
            }
        }
    };
}

memory_table!(Country, countries);
memory_table!(City, cities);
memory_table!(Address, addresses);
memory_table!(Customer, customers);
memory_table!(Staff, staff);
memory_table!(Payment, payments);

impl InMemoryStorefront {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, StorefrontTables>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, StorefrontTables>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn page_of<E: Entity>(rows: &BTreeMap<E::Id, E>, query: ListQuery) -> Vec<E> {
    let mut ordered: Vec<&E> = rows.values().collect();
    if query.order() == ListOrder::RecentlyUpdated {
        ordered.sort_by(|left, right| {
            right
                .recency()
                .cmp(&left.recency())
                .then_with(|| right.id().cmp(&left.id()))
        });
    }
    let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(query.limit()).unwrap_or(usize::MAX);
    ordered.into_iter().skip(skip).take(take).cloned().collect()
}

#[async_trait]
impl<E: MemoryTable> EntityRepository<E> for InMemoryStorefront {
    async fn find(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        let state = self.read()?;
        Ok(E::rows(&state).get(&id).cloned())
    }

    async fn list(&self, query: ListQuery) -> RepositoryResult<Vec<E>> {
        let state = self.read()?;
        Ok(page_of(E::rows(&state), query))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let state = self.read()?;
        u64::try_from(E::rows(&state).len()).map_err(RepositoryError::persistence)
    }

    async fn insert(&self, draft: E::Draft, now: DateTime<Utc>) -> RepositoryResult<E> {
        let mut state = self.write()?;
        state.check_references(&draft.references())?;

        let next_key = state.allocate_key(E::KIND);
        let entity = E::from_draft(E::Id::from_raw(next_key), draft, now);
        E::rows_mut(&mut state).insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: &E) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !E::rows(&state).contains_key(&entity.id()) {
            return Err(RepositoryError::NotFound(Reference::to(E::KIND, entity.id())));
        }
        state.check_references(&entity.references())?;
        E::rows_mut(&mut state).insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn delete(&self, id: E::Id) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let target = Reference::to(E::KIND, id);
        if !E::rows(&state).contains_key(&id) {
            return Err(RepositoryError::NotFound(target));
        }
        if let Some(referrer) = state.referrer_of(target) {
            return Err(RepositoryError::StillReferenced { target, referrer });
        }
        E::rows_mut(&mut state).remove(&id);
        Ok(())
    }
}

//! [`EntityRepository`] implementations for the six storefront tables.
//!
//! The tables differ only in their row types, key column and recency
//! column, so one macro expands the same Diesel queries for each.

use super::{
    models::{
        AddressChanges, AddressRow, CityChanges, CityRow, CountryChanges, CountryRow,
        CustomerChanges, CustomerRow, PaymentChanges, PaymentRow, StaffChanges, StaffRow,
        StoredRow,
    },
    schema::{address, city, country, customer, payment, staff},
    store::{PostgresStorefront, delete_error, write_error},
};
use crate::storefront::{
    domain::{
        Address, AddressId, City, CityId, Country, CountryId, Customer, CustomerId, Entity,
        EntityDraft, EntityKey, Payment, PaymentId, Reference, Staff, StaffId,
    },
    ports::{EntityRepository, ListOrder, ListQuery, RepositoryError, RepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

macro_rules! pg_repository {
    (
        $entity:ty,
        $id:ty,
        $table:ident,
        key: $key:ident,
        recency: $recency:ident,
        $row:ty,
        $changes:ty
    ) => {
        #[async_trait]
        impl EntityRepository<$entity> for PostgresStorefront {
            async fn find(&self, id: $id) -> RepositoryResult<Option<$entity>> {
                self.run_blocking(move |connection| {
                    let row = $table::table
                        .find(id.raw())
                        .select(<$row>::as_select())
                        .first::<$row>(connection)
                        .optional()
                        .map_err(RepositoryError::persistence)?;
                    row.map(StoredRow::into_entity).transpose()
                })
                .await
            }

            async fn list(&self, query: ListQuery) -> RepositoryResult<Vec<$entity>> {
                let limit = i64::from(query.limit());
                let offset =
                    i64::try_from(query.offset()).map_err(RepositoryError::persistence)?;
                self.run_blocking(move |connection| {
                    let select = $table::table.select(<$row>::as_select());
                    let rows = match query.order() {
                        ListOrder::ById => select
                            .order($table::$key.asc())
                            .limit(limit)
                            .offset(offset)
                            .load::<$row>(connection),
                        ListOrder::RecentlyUpdated => select
                            .order(($table::$recency.desc(), $table::$key.desc()))
                            .limit(limit)
                            .offset(offset)
                            .load::<$row>(connection),
                    }
                    .map_err(RepositoryError::persistence)?;
                    rows.into_iter().map(StoredRow::into_entity).collect()
                })
                .await
            }

            async fn count(&self) -> RepositoryResult<u64> {
                self.run_blocking(|connection| {
                    let total: i64 = $table::table
                        .count()
                        .get_result(connection)
                        .map_err(RepositoryError::persistence)?;
                    u64::try_from(total).map_err(RepositoryError::invalid_persisted_data)
                })
                .await
            }

            async fn insert(
                &self,
                draft: <$entity as Entity>::Draft,
                now: DateTime<Utc>,
            ) -> RepositoryResult<$entity> {
                let references = draft.references();
                // The placeholder key is never written; the column is serial.
                let unsaved = <$entity>::from_draft(<$id>::from_raw(0), draft, now);
                let changes = <$changes>::from(&unsaved);
                self.run_blocking(move |connection| {
                    let row = diesel::insert_into($table::table)
                        .values(&changes)
                        .returning(<$row>::as_returning())
                        .get_result::<$row>(connection)
                        .map_err(|err| write_error(err, <$entity>::KIND, &references))?;
                    row.into_entity()
                })
                .await
            }

            async fn update(&self, entity: &$entity) -> RepositoryResult<()> {
                let id = entity.id();
                let references = Entity::references(entity);
                let changes = <$changes>::from(entity);
                self.run_blocking(move |connection| {
                    let updated = diesel::update($table::table.find(id.raw()))
                        .set(&changes)
                        .execute(connection)
                        .map_err(|err| write_error(err, <$entity>::KIND, &references))?;
                    if updated == 0 {
                        return Err(RepositoryError::NotFound(Reference::to(
                            <$entity>::KIND,
                            id,
                        )));
                    }
                    Ok(())
                })
                .await
            }

            async fn delete(&self, id: $id) -> RepositoryResult<()> {
                let target = Reference::to(<$entity>::KIND, id);
                self.run_blocking(move |connection| {
                    let deleted = diesel::delete($table::table.find(id.raw()))
                        .execute(connection)
                        .map_err(|err| delete_error(err, target))?;
                    if deleted == 0 {
                        return Err(RepositoryError::NotFound(target));
                    }
                    Ok(())
                })
                .await
            }
        }
    };
}

pg_repository!(
    Country,
    CountryId,
    country,
    key: country_id,
    recency: last_update,
    CountryRow,
    CountryChanges
);
pg_repository!(
    City,
    CityId,
    city,
    key: city_id,
    recency: last_update,
    CityRow,
    CityChanges
);
pg_repository!(
    Address,
    AddressId,
    address,
    key: address_id,
    recency: last_update,
    AddressRow,
    AddressChanges
);
pg_repository!(
    Customer,
    CustomerId,
    customer,
    key: customer_id,
    recency: last_update,
    CustomerRow,
    CustomerChanges
);
pg_repository!(
    Staff,
    StaffId,
    staff,
    key: staff_id,
    recency: last_update,
    StaffRow,
    StaffChanges
);
pg_repository!(
    Payment,
    PaymentId,
    payment,
    key: payment_id,
    recency: payment_date,
    PaymentRow,
    PaymentChanges
);

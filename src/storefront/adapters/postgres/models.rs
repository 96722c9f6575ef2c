//! Diesel row models for the storefront tables.
//!
//! Each table has a query row (`*Row`) and a change set (`*Changes`) holding
//! every non-key column. The change set serves both inserts and updates, so
//! `None` is written as `NULL` rather than skipped.

use super::schema::{address, city, country, customer, payment, staff};
use crate::storefront::{
    domain::{
        Address, AddressDraft, AddressId, Amount, CardDetails, City, CityId, Country, CountryId,
        Customer, CustomerDraft, CustomerId, Payment, PaymentDraft, PaymentId, PersistedAddress,
        PersistedCustomer, PersistedStaff, Staff, StaffDraft, StaffId,
    },
    ports::{RepositoryError, RepositoryResult},
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Converts a query row into its domain entity.
pub trait StoredRow {
    /// Domain entity the row reconstructs.
    type Entity;

    /// Rebuilds the entity.
    fn into_entity(self) -> RepositoryResult<Self::Entity>;
}

/// Query row of the `country` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = country)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CountryRow {
    pub country_id: i32,
    pub name: String,
    pub last_update: DateTime<Utc>,
}

/// Writable columns of the `country` table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = country)]
pub struct CountryChanges {
    pub name: String,
    pub last_update: DateTime<Utc>,
}

impl StoredRow for CountryRow {
    type Entity = Country;

    fn into_entity(self) -> RepositoryResult<Country> {
        Ok(Country::from_persisted(
            CountryId::new(self.country_id),
            self.name,
            self.last_update,
        ))
    }
}

impl From<&Country> for CountryChanges {
    fn from(entity: &Country) -> Self {
        Self {
            name: entity.name().to_owned(),
            last_update: entity.last_update(),
        }
    }
}

/// Query row of the `city` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = city)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CityRow {
    pub city_id: i32,
    pub name: String,
    pub country_id: i32,
    pub last_update: DateTime<Utc>,
}

/// Writable columns of the `city` table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = city)]
pub struct CityChanges {
    pub name: String,
    pub country_id: i32,
    pub last_update: DateTime<Utc>,
}

impl StoredRow for CityRow {
    type Entity = City;

    fn into_entity(self) -> RepositoryResult<City> {
        Ok(City::from_persisted(
            CityId::new(self.city_id),
            self.name,
            CountryId::new(self.country_id),
            self.last_update,
        ))
    }
}

impl From<&City> for CityChanges {
    fn from(entity: &City) -> Self {
        Self {
            name: entity.name().to_owned(),
            country_id: entity.country_id().into_inner(),
            last_update: entity.last_update(),
        }
    }
}

/// Query row of the `address` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = address)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AddressRow {
    pub address_id: i32,
    pub line1: String,
    pub line2: Option<String>,
    pub district: String,
    pub city_id: i32,
    pub postal_code: Option<String>,
    pub phone: String,
    pub last_update: DateTime<Utc>,
}

/// Writable columns of the `address` table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = address)]
#[diesel(treat_none_as_null = true)]
pub struct AddressChanges {
    pub line1: String,
    pub line2: Option<String>,
    pub district: String,
    pub city_id: i32,
    pub postal_code: Option<String>,
    pub phone: String,
    pub last_update: DateTime<Utc>,
}

impl StoredRow for AddressRow {
    type Entity = Address;

    fn into_entity(self) -> RepositoryResult<Address> {
        Ok(Address::from_persisted(PersistedAddress {
            id: AddressId::new(self.address_id),
            fields: AddressDraft {
                line1: self.line1,
                line2: self.line2,
                district: self.district,
                city_id: CityId::new(self.city_id),
                postal_code: self.postal_code,
                phone: self.phone,
            },
            last_update: self.last_update,
        }))
    }
}

impl From<&Address> for AddressChanges {
    fn from(entity: &Address) -> Self {
        Self {
            line1: entity.line1().to_owned(),
            line2: entity.line2().map(str::to_owned),
            district: entity.district().to_owned(),
            city_id: entity.city_id().into_inner(),
            postal_code: entity.postal_code().map(str::to_owned),
            phone: entity.phone().to_owned(),
            last_update: entity.last_update(),
        }
    }
}

/// Query row of the `customer` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customer)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub customer_id: i32,
    pub store_id: i32,
    pub address_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub ssn: Option<String>,
    pub active: bool,
    pub create_date: NaiveDate,
    pub last_update: DateTime<Utc>,
}

/// Writable columns of the `customer` table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = customer)]
#[diesel(treat_none_as_null = true)]
pub struct CustomerChanges {
    pub store_id: i32,
    pub address_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub ssn: Option<String>,
    pub active: bool,
    pub create_date: NaiveDate,
    pub last_update: DateTime<Utc>,
}

impl StoredRow for CustomerRow {
    type Entity = Customer;

    fn into_entity(self) -> RepositoryResult<Customer> {
        Ok(Customer::from_persisted(PersistedCustomer {
            id: CustomerId::new(self.customer_id),
            fields: CustomerDraft {
                store_id: self.store_id,
                address_id: AddressId::new(self.address_id),
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                ssn: self.ssn,
                active: self.active,
            },
            create_date: self.create_date,
            last_update: self.last_update,
        }))
    }
}

impl From<&Customer> for CustomerChanges {
    fn from(entity: &Customer) -> Self {
        Self {
            store_id: entity.store_id(),
            address_id: entity.address_id().into_inner(),
            first_name: entity.first_name().to_owned(),
            last_name: entity.last_name().to_owned(),
            email: entity.email().map(str::to_owned),
            ssn: entity.ssn().map(str::to_owned),
            active: entity.is_active(),
            create_date: entity.create_date(),
            last_update: entity.last_update(),
        }
    }
}

/// Query row of the `staff` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffRow {
    pub staff_id: i32,
    pub store_id: i32,
    pub address_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub username: String,
    pub password: Option<String>,
    pub active: bool,
    pub last_update: DateTime<Utc>,
}

/// Writable columns of the `staff` table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = staff)]
#[diesel(treat_none_as_null = true)]
pub struct StaffChanges {
    pub store_id: i32,
    pub address_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub username: String,
    pub password: Option<String>,
    pub active: bool,
    pub last_update: DateTime<Utc>,
}

impl StoredRow for StaffRow {
    type Entity = Staff;

    fn into_entity(self) -> RepositoryResult<Staff> {
        Ok(Staff::from_persisted(PersistedStaff {
            id: StaffId::new(self.staff_id),
            fields: StaffDraft {
                store_id: self.store_id,
                address_id: AddressId::new(self.address_id),
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                username: self.username,
                password: self.password,
                active: self.active,
            },
            last_update: self.last_update,
        }))
    }
}

impl From<&Staff> for StaffChanges {
    fn from(entity: &Staff) -> Self {
        Self {
            store_id: entity.store_id(),
            address_id: entity.address_id().into_inner(),
            first_name: entity.first_name().to_owned(),
            last_name: entity.last_name().to_owned(),
            email: entity.email().map(str::to_owned),
            username: entity.username().to_owned(),
            password: entity.password().map(str::to_owned),
            active: entity.is_active(),
            last_update: entity.last_update(),
        }
    }
}

/// Query row of the `payment` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    pub payment_id: i32,
    pub amount: BigDecimal,
    pub customer_id: i32,
    pub staff_id: i32,
    pub rental_id: Option<i32>,
    pub cc_number: Option<String>,
    pub cc_expiration: Option<String>,
    pub cc_cvv: Option<String>,
    pub payment_date: DateTime<Utc>,
}

/// Writable columns of the `payment` table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = payment)]
#[diesel(treat_none_as_null = true)]
pub struct PaymentChanges {
    pub amount: BigDecimal,
    pub customer_id: i32,
    pub staff_id: i32,
    pub rental_id: Option<i32>,
    pub cc_number: Option<String>,
    pub cc_expiration: Option<String>,
    pub cc_cvv: Option<String>,
    pub payment_date: DateTime<Utc>,
}

impl StoredRow for PaymentRow {
    type Entity = Payment;

    fn into_entity(self) -> RepositoryResult<Payment> {
        let amount = amount_from_numeric(&self.amount)?;
        let fields = PaymentDraft {
            amount,
            customer_id: CustomerId::new(self.customer_id),
            staff_id: StaffId::new(self.staff_id),
            rental_id: self.rental_id,
            card: CardDetails {
                cc_number: self.cc_number,
                cc_expiration: self.cc_expiration,
                cc_cvv: self.cc_cvv,
            },
            payment_date: None,
        };
        Ok(Payment::from_persisted(
            PaymentId::new(self.payment_id),
            fields,
            self.payment_date,
        ))
    }
}

impl From<&Payment> for PaymentChanges {
    fn from(entity: &Payment) -> Self {
        let card = entity.card();
        Self {
            amount: BigDecimal::new(entity.amount().cents().into(), 2),
            customer_id: entity.customer_id().into_inner(),
            staff_id: entity.staff_id().into_inner(),
            rental_id: entity.rental_id(),
            cc_number: card.cc_number.clone(),
            cc_expiration: card.cc_expiration.clone(),
            cc_cvv: card.cc_cvv.clone(),
            payment_date: entity.payment_date(),
        }
    }
}

fn amount_from_numeric(value: &BigDecimal) -> RepositoryResult<Amount> {
    let (digits, _) = value.with_scale(2).into_bigint_and_exponent();
    let cents = i64::try_from(digits).map_err(RepositoryError::invalid_persisted_data)?;
    Amount::from_cents(cents).map_err(RepositoryError::invalid_persisted_data)
}

//! Seed rows shared by the storefront integration tests.

use storefront_admin::storefront::{
    domain::{
        Address, AddressDraft, Amount, City, CityDraft, Country, CountryDraft, Customer,
        CustomerDraft, Entity, Payment, PaymentDraft, Staff, StaffDraft,
    },
    ports::StorefrontStore,
    services::{ModelRegistry, RegistryError},
};
use mockable::Clock;

/// One row of every table, linked parent to child.
pub struct Seeded {
    /// Seeded country.
    pub country: Country,
    /// City in that country.
    pub city: City,
    /// Address in that city.
    pub address: Address,
    /// Customer at that address.
    pub customer: Customer,
    /// Staff member at that address.
    pub staff: Staff,
    /// Payment by the customer, taken by the staff member.
    pub payment: Payment,
}

/// Inserts one linked row per table.
///
/// # Errors
///
/// Returns the first [`RegistryError`] raised by an insert.
pub async fn seed<S, C>(registry: &ModelRegistry<S, C>) -> Result<Seeded, RegistryError>
where
    S: StorefrontStore,
    C: Clock + Send + Sync,
{
    let country = registry.countries().create(CountryDraft::new("Australia")).await?;
    let city = registry
        .cities()
        .create(CityDraft::new("Woodridge", country.id()))
        .await?;
    let address = registry
        .addresses()
        .create(AddressDraft {
            line1: "28 MySQL Boulevard".to_owned(),
            line2: None,
            district: "QLD".to_owned(),
            city_id: city.id(),
            postal_code: None,
            phone: "6172235589".to_owned(),
        })
        .await?;
    let customer = registry
        .customers()
        .create(
            CustomerDraft::new(2, address.id(), "Linda", "Williams")
                .with_email("linda.williams@example.org"),
        )
        .await?;
    let staff = registry
        .staff()
        .create(
            StaffDraft::new(2, address.id(), "Jon", "Stephens", "jon")
                .with_password("8cb2237d0679ca88db6464eac60da96345513964"),
        )
        .await?;
    let payment = registry
        .payments()
        .create(PaymentDraft::new(
            "5.99".parse::<Amount>().map_err(|err| RegistryError::Domain(err.into()))?,
            customer.id(),
            staff.id(),
        ))
        .await?;
    Ok(Seeded {
        country,
        city,
        address,
        customer,
        staff,
        payment,
    })
}

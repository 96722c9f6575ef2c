//! Association traversal over the in-memory store.

use super::helpers::{MemoryRegistry, registry};
use crate::test_helpers::storefront::seed;
use rstest::rstest;
use storefront_admin::storefront::{
    domain::{Address, City, Country, Customer, Entity, Staff},
    services::RegistryError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payment_resolves_to_its_customer_and_staff(registry: MemoryRegistry) {
    let seeded = seed(&registry).await.expect("seed rows");

    let customer: Customer = registry.resolve(&seeded.payment).await.expect("customer");
    let staff: Staff = registry.resolve(&seeded.payment).await.expect("staff");

    assert_eq!(customer.id(), seeded.payment.customer_id());
    assert_eq!(customer, seeded.customer);
    assert_eq!(staff.id(), seeded.payment.staff_id());
    assert_eq!(staff.username(), "jon");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn address_chain_reaches_the_country(registry: MemoryRegistry) {
    let seeded = seed(&registry).await.expect("seed rows");

    let address: Address = registry.resolve(&seeded.staff).await.expect("address");
    let city: City = registry.resolve(&address).await.expect("city");
    let country: Country = registry.resolve(&city).await.expect("country");

    assert_eq!(address, seeded.address);
    assert_eq!(city, seeded.city);
    assert_eq!(country.name(), "Australia");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn customer_location_collects_the_chain(registry: MemoryRegistry) {
    let seeded = seed(&registry).await.expect("seed rows");

    let location = registry
        .customer_location(seeded.customer.id())
        .await
        .expect("location");

    assert_eq!(location.customer, seeded.customer);
    assert_eq!(location.address, seeded.address);
    assert_eq!(location.city, seeded.city);
    assert_eq!(location.country, seeded.country);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn models_match_the_stored_associations(registry: MemoryRegistry) {
    let models = registry.models();
    let payment = models.get("payment").expect("payment model");
    let targets: Vec<_> = payment
        .associations
        .iter()
        .map(|assoc| (assoc.name, assoc.foreign_key, assoc.target.as_str()))
        .collect();
    assert_eq!(
        targets,
        vec![
            ("customer", "customer_id", "customer"),
            ("staff", "staff_id", "staff"),
        ]
    );
    assert!(models.get("country").expect("country model").associations.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_customer_location_is_not_found(registry: MemoryRegistry) {
    let err = registry
        .customer_location(99.into())
        .await
        .expect_err("no customer 99");
    assert!(matches!(err, RegistryError::Repository(_)));
}

//! Foreign-key enforcement in the in-memory store.

use super::helpers::{MemoryRegistry, registry};
use crate::test_helpers::storefront::seed;
use rstest::rstest;
use storefront_admin::storefront::{
    domain::{
        Amount, CityDraft, CountryDraft, CountryId, CustomerDraft, CustomerId, Entity,
        EntityKind, PaymentDraft, Reference, StaffId,
    },
    ports::RepositoryError,
    services::RegistryError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_with_missing_parent_is_refused(registry: MemoryRegistry) {
    let err = registry
        .cities()
        .create(CityDraft::new("Nowhere", CountryId::new(7)))
        .await
        .expect_err("country 7 does not exist");
    assert!(matches!(
        err,
        RegistryError::Repository(RepositoryError::MissingReference(reference))
            if reference == Reference::to(EntityKind::Country, CountryId::new(7))
    ));
    assert_eq!(registry.cities().count().await.expect("count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payment_needs_both_parents(registry: MemoryRegistry) {
    let seeded = seed(&registry).await.expect("seed rows");
    let draft = PaymentDraft::new(
        Amount::from_cents(299).expect("amount"),
        seeded.customer.id(),
        StaffId::new(40),
    );
    let err = registry.payments().create(draft).await.expect_err("staff 40 missing");
    assert!(matches!(
        err,
        RegistryError::Repository(RepositoryError::MissingReference(reference))
            if reference.kind == EntityKind::Staff
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_to_missing_parent_is_refused(registry: MemoryRegistry) {
    let seeded = seed(&registry).await.expect("seed rows");
    let draft = CustomerDraft::new(2, 50.into(), "Linda", "Williams");
    let err = registry
        .customers()
        .update(seeded.customer.id(), draft)
        .await
        .expect_err("address 50 missing");
    assert!(matches!(
        err,
        RegistryError::Repository(RepositoryError::MissingReference(_))
    ));
    let unchanged = registry
        .customers()
        .get(seeded.customer.id())
        .await
        .expect("customer still there");
    assert_eq!(unchanged, seeded.customer);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn referenced_rows_cannot_be_deleted(registry: MemoryRegistry) {
    let seeded = seed(&registry).await.expect("seed rows");

    let err = registry
        .customers()
        .delete(seeded.customer.id())
        .await
        .expect_err("payment references the customer");
    assert!(matches!(
        err,
        RegistryError::Repository(RepositoryError::StillReferenced {
            referrer: EntityKind::Payment,
            ..
        })
    ));

    let err = registry
        .countries()
        .delete(seeded.country.id())
        .await
        .expect_err("city references the country");
    assert!(matches!(
        err,
        RegistryError::Repository(RepositoryError::StillReferenced {
            referrer: EntityKind::City,
            ..
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rows_delete_leaf_first(registry: MemoryRegistry) {
    let seeded = seed(&registry).await.expect("seed rows");

    registry.payments().delete(seeded.payment.id()).await.expect("payment");
    registry.customers().delete(seeded.customer.id()).await.expect("customer");
    registry.staff().delete(seeded.staff.id()).await.expect("staff");
    registry.addresses().delete(seeded.address.id()).await.expect("address");
    registry.cities().delete(seeded.city.id()).await.expect("city");
    registry.countries().delete(seeded.country.id()).await.expect("country");

    assert_eq!(registry.countries().count().await.expect("count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_row_is_not_found(registry: MemoryRegistry) {
    let err = registry
        .customers()
        .delete(CustomerId::new(3))
        .await
        .expect_err("no customer 3");
    assert!(matches!(
        err,
        RegistryError::Repository(RepositoryError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_keys_are_not_reused(registry: MemoryRegistry) {
    let countries = registry.countries();
    let first = countries.create(CountryDraft::new("Peru")).await.expect("first");
    let second = countries.create(CountryDraft::new("Chile")).await.expect("second");
    countries.delete(second.id()).await.expect("delete highest key");

    let third = countries.create(CountryDraft::new("Bolivia")).await.expect("third");

    assert_eq!(first.id(), CountryId::new(1));
    assert_eq!(third.id(), CountryId::new(3));
    assert!(countries.find(second.id()).await.expect("lookup").is_none());
}

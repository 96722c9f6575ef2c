//! Then steps for storefront registry scenarios.

use super::world::{StorefrontWorld, require, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use storefront_admin::storefront::{
    domain::{Customer, Entity, EntityKind},
    ports::RepositoryError,
    services::RegistryError,
};

#[then(r#"the payment belongs to customer "{first_name}" "{last_name}""#)]
fn payment_belongs_to(
    world: &mut StorefrontWorld,
    first_name: String,
    last_name: String,
) -> Result<(), eyre::Report> {
    let payment = require(world.payment.as_ref(), "payment")?;
    let customer: Customer =
        run_async(world.registry.resolve(payment)).wrap_err("resolve payment customer")?;
    if customer.id() != payment.customer_id() {
        return Err(eyre::eyre!("resolved a different customer row"));
    }
    if customer.first_name() != first_name || customer.last_name() != last_name {
        return Err(eyre::eyre!(
            "expected {first_name} {last_name}, found {} {}",
            customer.first_name(),
            customer.last_name()
        ));
    }
    Ok(())
}

#[then(r#"the payment amount reads "{amount}""#)]
fn payment_amount_reads(world: &mut StorefrontWorld, amount: String) -> Result<(), eyre::Report> {
    let payment = require(world.payment.as_ref(), "payment")?;
    let shown = payment.amount().to_string();
    if shown != amount {
        return Err(eyre::eyre!("expected amount {amount}, found {shown}"));
    }
    Ok(())
}

#[then("the deletion is refused because a city still references it")]
fn deletion_refused(world: &mut StorefrontWorld) -> Result<(), eyre::Report> {
    match require(world.deletion.as_ref(), "deletion result")? {
        Err(RegistryError::Repository(RepositoryError::StillReferenced {
            referrer: EntityKind::City,
            ..
        })) => Ok(()),
        other => Err(eyre::eyre!("expected a still-referenced error, got {other:?}")),
    }
}

#[then("{count:usize} customers are returned")]
fn customers_returned(world: &mut StorefrontWorld, count: usize) -> Result<(), eyre::Report> {
    if world.listed.len() != count {
        return Err(eyre::eyre!(
            "expected {count} customers, found {}",
            world.listed.len()
        ));
    }
    Ok(())
}

#[then("the first listed customer is the last one created")]
fn newest_first(world: &mut StorefrontWorld) -> Result<(), eyre::Report> {
    let newest = require(world.customers.last(), "created customer")?;
    let first = require(world.listed.first(), "listed customer")?;
    if first.id() != newest.id() {
        return Err(eyre::eyre!(
            "expected customer {} first, found {}",
            newest.id(),
            first.id()
        ));
    }
    Ok(())
}

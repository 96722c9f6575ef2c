//! Given steps for storefront registry scenarios.

use super::world::{StorefrontWorld, require, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use storefront_admin::storefront::domain::{
    AddressDraft, CityDraft, CountryDraft, CustomerDraft, Entity, StaffDraft,
};

#[given(r#"a country named "{name}""#)]
fn a_country(world: &mut StorefrontWorld, name: String) -> Result<(), eyre::Report> {
    let country = run_async(world.registry.countries().create(CountryDraft::new(name)))
        .wrap_err("create country")?;
    world.country = Some(country);
    Ok(())
}

#[given(r#"a city named "{name}" in that country"#)]
fn a_city(world: &mut StorefrontWorld, name: String) -> Result<(), eyre::Report> {
    let country_id = require(world.country.as_ref(), "country")?.id();
    let city = run_async(world.registry.cities().create(CityDraft::new(name, country_id)))
        .wrap_err("create city")?;
    world.city = Some(city);
    Ok(())
}

#[given("an address in that city")]
fn an_address(world: &mut StorefrontWorld) -> Result<(), eyre::Report> {
    let city_id = require(world.city.as_ref(), "city")?.id();
    let draft = AddressDraft {
        line1: "1913 Hanoi Way".to_owned(),
        line2: None,
        district: "Kansai".to_owned(),
        city_id,
        postal_code: Some("35200".to_owned()),
        phone: "28303384290".to_owned(),
    };
    let address =
        run_async(world.registry.addresses().create(draft)).wrap_err("create address")?;
    world.address = Some(address);
    Ok(())
}

#[given(r#"a customer "{first_name}" "{last_name}" at that address"#)]
fn a_customer(
    world: &mut StorefrontWorld,
    first_name: String,
    last_name: String,
) -> Result<(), eyre::Report> {
    let address_id = require(world.address.as_ref(), "address")?.id();
    let draft = CustomerDraft::new(1, address_id, first_name, last_name);
    let customer =
        run_async(world.registry.customers().create(draft)).wrap_err("create customer")?;
    world.customers.push(customer);
    Ok(())
}

#[given("{count:usize} customers at that address")]
fn many_customers(world: &mut StorefrontWorld, count: usize) -> Result<(), eyre::Report> {
    let address_id = require(world.address.as_ref(), "address")?.id();
    for index in 0..count {
        let draft = CustomerDraft::new(1, address_id, format!("Customer{index}"), "Example");
        let customer =
            run_async(world.registry.customers().create(draft)).wrap_err("create customer")?;
        world.customers.push(customer);
    }
    Ok(())
}

#[given(r#"a staff member "{username}" at that address"#)]
fn a_staff_member(world: &mut StorefrontWorld, username: String) -> Result<(), eyre::Report> {
    let address_id = require(world.address.as_ref(), "address")?.id();
    let draft = StaffDraft::new(1, address_id, "Mike", "Hillyer", username);
    let staff = run_async(world.registry.staff().create(draft)).wrap_err("create staff")?;
    world.staff = Some(staff);
    Ok(())
}

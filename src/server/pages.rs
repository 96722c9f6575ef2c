//! Server-rendered storefront pages.

use crate::agent::registry_status;
use crate::storefront::{
    domain::{AddressId, CustomerDraft, CustomerId, Entity},
    ports::{ListOrder, ListQuery, StorefrontStore},
    services::{ModelRegistry, RegistryError},
};
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use minijinja::{Environment, context};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Rows shown per page.
pub const PAGE_SIZE: u32 = 10;

const CUSTOMERS_TEMPLATE: &str = "customers.html";
const STAFF_TEMPLATE: &str = "staff.html";

fn templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut environment = Environment::new();
    environment.add_template(
        CUSTOMERS_TEMPLATE,
        include_str!("../../templates/customers.html"),
    )?;
    environment.add_template(STAFF_TEMPLATE, include_str!("../../templates/staff.html"))?;
    Ok(environment)
}

/// Store and address given to customers created from the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerDefaults {
    /// Store key.
    pub store_id: i32,
    /// Address key.
    pub address_id: AddressId,
}

/// Errors rendered by the storefront pages.
#[derive(Debug, Error)]
pub enum PageError {
    /// The registry rejected the request.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A template failed to load or render.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Registry(err) => registry_status(err),
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "page request failed");
        }
        (status, self.to_string()).into_response()
    }
}

/// Shared state of the storefront pages.
pub struct Pages<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    registry: ModelRegistry<S, C>,
    templates: Arc<Environment<'static>>,
    defaults: CustomerDefaults,
}

impl<S, C> Clone for Pages<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            templates: Arc::clone(&self.templates),
            defaults: self.defaults,
        }
    }
}

impl<S, C> Pages<S, C>
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    /// Loads the page templates.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Render`] when a template does not parse.
    pub fn new(registry: ModelRegistry<S, C>, defaults: CustomerDefaults) -> Result<Self, PageError> {
        Ok(Self {
            registry,
            templates: Arc::new(templates()?),
            defaults,
        })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<Html<String>, PageError> {
        Ok(Html(self.templates.get_template(name)?.render(ctx)?))
    }
}

/// Parses a `page` query value; negative or unparsable values become 0.
#[must_use]
pub fn page_number(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(0)
}

fn page_count(rows: u64) -> u64 {
    rows.div_ceil(u64::from(PAGE_SIZE)).max(1)
}

fn recent_page(page: u32) -> ListQuery {
    ListQuery::new()
        .with_page(page)
        .with_page_size(PAGE_SIZE)
        .ordered_by(ListOrder::RecentlyUpdated)
}

#[derive(Debug, Default, Deserialize)]
struct CustomerParams {
    page: Option<String>,
    customer_id: Option<String>,
    new: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StaffParams {
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewCustomerForm {
    first_name: String,
    last_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    active: Option<String>,
}

async fn customers_page<S, C>(
    State(pages): State<Pages<S, C>>,
    Query(params): Query<CustomerParams>,
) -> Result<Html<String>, PageError>
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    if params.new.as_deref() == Some("t") {
        return pages.render(CUSTOMERS_TEMPLATE, context! { creating => true });
    }

    let selected = params
        .customer_id
        .as_deref()
        .and_then(|value| value.trim().parse::<i32>().ok());
    if let Some(id) = selected {
        let customer = pages.registry.customers().get(CustomerId::new(id)).await?;
        return pages.render(CUSTOMERS_TEMPLATE, context! { customer => customer });
    }

    let page = page_number(params.page.as_deref());
    let customers = pages.registry.customers();
    let rows = customers.list(recent_page(page)).await?;
    let pages_total = page_count(customers.count().await?);
    pages.render(
        CUSTOMERS_TEMPLATE,
        context! { customers => rows, page => page, pages => pages_total },
    )
}

async fn create_customer<S, C>(
    State(pages): State<Pages<S, C>>,
    Form(form): Form<NewCustomerForm>,
) -> Result<Redirect, PageError>
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    let mut draft = CustomerDraft::new(
        pages.defaults.store_id,
        pages.defaults.address_id,
        form.first_name,
        form.last_name,
    )
    .with_active(form.active.is_some());
    draft.email = form.email;

    let customer = pages.registry.customers().create(draft).await?;
    tracing::info!(customer_id = %customer.id(), "customer created from storefront page");
    Ok(Redirect::to("/customers"))
}

async fn staff_page<S, C>(
    State(pages): State<Pages<S, C>>,
    Query(params): Query<StaffParams>,
) -> Result<Html<String>, PageError>
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    let page = page_number(params.page.as_deref());
    let staff = pages.registry.staff();
    let rows = staff.list(recent_page(page)).await?;
    let pages_total = page_count(staff.count().await?);
    pages.render(
        STAFF_TEMPLATE,
        context! { staff => rows, page => page, pages => pages_total },
    )
}

/// Routes of the storefront pages.
pub fn routes<S, C>(pages: Pages<S, C>) -> Router
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/customers",
            get(customers_page::<S, C>).post(create_customer::<S, C>),
        )
        .route("/staff", get(staff_page::<S, C>))
        .with_state(pages)
}

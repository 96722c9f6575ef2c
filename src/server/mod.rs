//! HTTP shell: liveness route, storefront pages and the admin agent.

pub mod pages;
pub mod shutdown;

#[cfg(test)]
mod tests;

use crate::agent::AdminAgent;
use crate::storefront::ports::StorefrontStore;
use axum::{Router, routing::get};
use mockable::Clock;
use pages::Pages;

/// Body of the liveness route.
pub const LIVENESS_BODY: &str = "ping";

/// Builds the full application router.
///
/// The agent routes are mounted first so they take the `/forest` prefix
/// before any other handler.
pub fn router<S, C>(agent: &AdminAgent, pages: Pages<S, C>) -> Router
where
    S: StorefrontStore,
    C: Clock + Send + Sync + 'static,
{
    let shell = Router::new().route("/", get(|| async { LIVENESS_BODY }));
    agent
        .mount(Router::new())
        .merge(shell)
        .merge(pages::routes(pages))
}

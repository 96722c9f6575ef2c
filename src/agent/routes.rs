//! HTTP routes served by the admin agent under `/forest`.

use super::auth::{AdminClaims, AuthError, TokenVerifier};
use super::options::{AgentLog, AgentLogLevel};
use crate::datasource::{Datasource, DatasourceError};
use crate::storefront::{
    ports::{ListOrder, ListQuery, RepositoryError},
    services::RegistryError,
};
use axum::{
    Json, Router,
    extract::{
        FromRequestParts, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Datasources keyed by the collection names they serve.
pub(crate) type CollectionIndex = BTreeMap<String, Arc<dyn Datasource>>;

/// Shared state of the agent routes.
#[derive(Clone)]
pub(crate) struct AgentState {
    pub(crate) collections: Arc<CollectionIndex>,
    pub(crate) verifier: Arc<TokenVerifier>,
    pub(crate) log: AgentLog,
}

impl AgentState {
    fn datasource(&self, collection: &str) -> Result<Arc<dyn Datasource>, ApiError> {
        self.collections
            .get(collection)
            .cloned()
            .ok_or_else(|| DatasourceError::UnknownCollection(collection.to_owned()).into())
    }
}

/// Maps a registry failure to the HTTP status reported to clients.
pub(crate) const fn registry_status(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistryError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        RegistryError::Repository(
            RepositoryError::MissingReference(_) | RepositoryError::StillReferenced { .. },
        )
        | RegistryError::DanglingReference { .. } => StatusCode::CONFLICT,
        RegistryError::Repository(
            RepositoryError::InvalidPersistedData(_) | RepositoryError::Persistence(_),
        ) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const fn datasource_status(err: &DatasourceError) -> StatusCode {
    match err {
        DatasourceError::UnknownCollection(_) | DatasourceError::UnknownRelation { .. } => {
            StatusCode::NOT_FOUND
        }
        DatasourceError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DatasourceError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DatasourceError::Registry(inner) => registry_status(inner),
    }
}

/// Error rendered as a JSON `errors` document.
#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(AuthError),
    Datasource(DatasourceError),
    Rejected { status: StatusCode, detail: String },
}

macro_rules! rejected_by {
    ($rejection:ty) => {
        impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                Self::Rejected {
                    status: rejection.status(),
                    detail: rejection.body_text(),
                }
            }
        }
    };
}

rejected_by!(PathRejection);
rejected_by!(QueryRejection);
rejected_by!(JsonRejection);

impl From<DatasourceError> for ApiError {
    fn from(err: DatasourceError) -> Self {
        Self::Datasource(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Unauthorized(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            Self::Datasource(err) => (datasource_status(&err), err.to_string()),
            Self::Rejected { status, detail } => (status, detail),
        };
        let body = json!({
            "errors": [{ "status": status.as_u16(), "detail": detail }]
        });
        (status, Json(body)).into_response()
    }
}

/// An authenticated admin user.
#[derive(Debug, Clone)]
pub(crate) struct AdminUser(pub(crate) AdminClaims);

impl FromRequestParts<AgentState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AgentState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        match state.verifier.verify_header(header_value) {
            Ok(claims) => Ok(Self(claims)),
            Err(err) => {
                state.log.emit(
                    AgentLogLevel::Debug,
                    &format!("rejected request to {}: {err}", parts.uri.path()),
                );
                Err(ApiError::Unauthorized(err))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageParams {
    #[serde(rename = "page[number]")]
    number: Option<u32>,
    #[serde(rename = "page[size]")]
    size: Option<u32>,
    sort: Option<String>,
}

impl PageParams {
    fn into_query(self) -> ListQuery {
        let order = match self.sort.as_deref() {
            Some("-last_update" | "-payment_date") => ListOrder::RecentlyUpdated,
            _ => ListOrder::ById,
        };
        ListQuery::new()
            .with_page(self.number.unwrap_or(1).saturating_sub(1))
            .with_page_size(self.size.unwrap_or(ListQuery::DEFAULT_PAGE_SIZE))
            .ordered_by(order)
    }
}

async fn list_rows(
    State(state): State<AgentState>,
    AdminUser(user): AdminUser,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(collection) = path?;
    let Query(params) = query?;
    state.log.emit(
        AgentLogLevel::Debug,
        &format!("{} lists {collection}", user.email),
    );
    let rows = state
        .datasource(&collection)?
        .list(&collection, params.into_query())
        .await?;
    Ok(Json(json!({ "data": rows })))
}

async fn count_rows(
    State(state): State<AgentState>,
    _user: AdminUser,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(collection) = path?;
    let count = state.datasource(&collection)?.count(&collection).await?;
    Ok(Json(json!({ "count": count })))
}

async fn create_row(
    State(state): State<AgentState>,
    AdminUser(user): AdminUser,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Path(collection) = path?;
    let Json(body) = payload?;
    let row = state
        .datasource(&collection)?
        .create(&collection, body)
        .await?;
    state.log.emit(
        AgentLogLevel::Info,
        &format!("{} created a {collection} row", user.email),
    );
    Ok((StatusCode::CREATED, Json(json!({ "data": row }))))
}

async fn get_row(
    State(state): State<AgentState>,
    _user: AdminUser,
    path: Result<Path<(String, i32)>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path((collection, id)) = path?;
    let row = state.datasource(&collection)?.get(&collection, id).await?;
    Ok(Json(json!({ "data": row })))
}

async fn update_row(
    State(state): State<AgentState>,
    AdminUser(user): AdminUser,
    path: Result<Path<(String, i32)>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path((collection, id)) = path?;
    let Json(body) = payload?;
    let row = state
        .datasource(&collection)?
        .update(&collection, id, body)
        .await?;
    state.log.emit(
        AgentLogLevel::Info,
        &format!("{} updated {collection} {id}", user.email),
    );
    Ok(Json(json!({ "data": row })))
}

async fn delete_row(
    State(state): State<AgentState>,
    AdminUser(user): AdminUser,
    path: Result<Path<(String, i32)>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path((collection, id)) = path?;
    state
        .datasource(&collection)?
        .delete(&collection, id)
        .await?;
    state.log.emit(
        AgentLogLevel::Info,
        &format!("{} deleted {collection} {id}", user.email),
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn related_row(
    State(state): State<AgentState>,
    _user: AdminUser,
    path: Result<Path<(String, i32, String)>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path((collection, id, relation)) = path?;
    let row = state
        .datasource(&collection)?
        .related(&collection, id, &relation)
        .await?;
    Ok(Json(json!({ "data": row })))
}

/// Builds the agent router with its state applied.
pub(crate) fn router(state: AgentState) -> Router {
    Router::new()
        .route("/forest", get(|| async { StatusCode::NO_CONTENT }))
        .route("/forest/{collection}", get(list_rows).post(create_row))
        .route("/forest/{collection}/count", get(count_rows))
        .route(
            "/forest/{collection}/{id}",
            get(get_row).put(update_row).delete(delete_row),
        )
        .route(
            "/forest/{collection}/{id}/relationships/{relation}",
            get(related_row),
        )
        .with_state(state)
}

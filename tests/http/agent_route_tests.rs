//! Authenticated agent routes under `/forest`.

use super::helpers::{authed, bearer, json, send, test_app};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rstest::rstest;
use serde_json::json;
use storefront_admin::storefront::domain::Entity;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn healthcheck_needs_no_token() {
    let app = test_app().await;
    let request = Request::get("/forest").body(Body::empty()).expect("request");
    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[case(None)]
#[case(Some("Bearer not-a-jwt".to_owned()))]
#[case(Some(bearer("some-other-secret")))]
#[tokio::test(flavor = "multi_thread")]
async fn collection_routes_reject_bad_tokens(#[case] authorization: Option<String>) {
    let app = test_app().await;
    let mut builder = Request::get("/forest/customer");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let response = send(&app.router, builder.body(Body::empty()).expect("request")).await;
    let body = json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(body["errors"][0]["status"], 401);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_rows_of_the_collection() {
    let app = test_app().await;
    let response = send(&app.router, authed("GET", "/forest/customer", None)).await;
    let body = json(response, StatusCode::OK).await;
    assert_eq!(body["data"][0]["first_name"], "Linda");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_honours_page_parameters() {
    let app = test_app().await;
    for name in ["Spain", "Chile", "Peru"] {
        let response = send(
            &app.router,
            authed("POST", "/forest/country", Some(&json!({ "name": name }))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send(
        &app.router,
        authed("GET", "/forest/country?page%5Bnumber%5D=2&page%5Bsize%5D=2", None),
    )
    .await;
    let body = json(response, StatusCode::OK).await;
    let names: Vec<_> = body["data"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Chile"), json!("Peru")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn count_reports_all_rows() {
    let app = test_app().await;
    let response = send(&app.router, authed("GET", "/forest/payment/count", None)).await;
    assert_eq!(json(response, StatusCode::OK).await, json!({ "count": 1 }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn staff_rows_never_expose_passwords() {
    let app = test_app().await;
    let uri = format!("/forest/staff/{}", app.seeded.staff.id());
    let body = json(send(&app.router, authed("GET", &uri, None)).await, StatusCode::OK).await;
    assert_eq!(body["data"]["username"], "jon");
    assert!(body["data"].get("password").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn relationship_route_follows_foreign_keys() {
    let app = test_app().await;
    let uri = format!(
        "/forest/payment/{}/relationships/customer",
        app.seeded.payment.id()
    );
    let body = json(send(&app.router, authed("GET", &uri, None)).await, StatusCode::OK).await;
    assert_eq!(body["data"]["id"], app.seeded.customer.id().into_inner());
}

#[rstest]
#[case("/forest/rental", StatusCode::NOT_FOUND)]
#[case("/forest/customer/404", StatusCode::NOT_FOUND)]
#[case("/forest/city/1/relationships/mayor", StatusCode::NOT_FOUND)]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_targets_are_not_found(#[case] uri: &str, #[case] status: StatusCode) {
    let app = test_app().await;
    let response = send(&app.router, authed("GET", uri, None)).await;
    let body = json(response, status).await;
    assert!(body["errors"][0]["detail"].is_string());
}

#[rstest]
#[case("GET", "/forest/customer/abc", StatusCode::BAD_REQUEST)]
#[case("DELETE", "/forest/payment/1.5", StatusCode::BAD_REQUEST)]
#[case("GET", "/forest/city?page%5Bnumber%5D=first", StatusCode::BAD_REQUEST)]
#[case("PUT", "/forest/country/1", StatusCode::UNSUPPORTED_MEDIA_TYPE)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_requests_report_json_errors(
    #[case] method: &str,
    #[case] uri: &str,
    #[case] status: StatusCode,
) {
    let app = test_app().await;
    let response = send(&app.router, authed(method, uri, None)).await;
    let body = json(response, status).await;
    assert_eq!(body["errors"][0]["status"], status.as_u16());
    assert!(body["errors"][0]["detail"].is_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_payloads_are_unprocessable() {
    let app = test_app().await;
    let blank = json!({ "name": "   " });
    let response = send(&app.router, authed("POST", "/forest/country", Some(&blank))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let wrong_shape = json!({ "title": "Spain" });
    let response = send(&app.router, authed("POST", "/forest/country", Some(&wrong_shape))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn integrity_violations_conflict() {
    let app = test_app().await;
    let orphan = json!({ "name": "Atlantis", "country_id": 999 });
    let response = send(&app.router, authed("POST", "/forest/city", Some(&orphan))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let uri = format!("/forest/customer/{}", app.seeded.customer.id());
    let response = send(&app.router, authed("DELETE", &uri, None)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_then_delete_a_row() {
    let app = test_app().await;
    let uri = format!("/forest/payment/{}", app.seeded.payment.id());
    let revised = json!({
        "amount": "7.50",
        "customer_id": app.seeded.customer.id(),
        "staff_id": app.seeded.staff.id()
    });
    let body = json(
        send(&app.router, authed("PUT", &uri, Some(&revised))).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["data"]["amount"], "7.50");

    let response = send(&app.router, authed("DELETE", &uri, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.registry.payments().count().await.expect("count"), 0);
}

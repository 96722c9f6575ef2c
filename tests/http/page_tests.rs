//! Liveness route and storefront pages.

use super::helpers::{send, test_app, text};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rstest::rstest;
use storefront_admin::storefront::{
    domain::{CustomerDraft, Entity},
    ports::ListQuery,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn root_answers_ping() {
    let app = test_app().await;
    let response = send(&app.router, Request::get("/").body(Body::empty()).expect("request")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "ping");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn customers_page_lists_recent_customers_first() {
    let app = test_app().await;
    for index in 0..11 {
        app.registry
            .customers()
            .create(CustomerDraft::new(
                1,
                app.seeded.address.id(),
                format!("Guest{index:02}"),
                "Visitor",
            ))
            .await
            .expect("customer");
    }

    let first = text(
        send(
            &app.router,
            Request::get("/customers").body(Body::empty()).expect("request"),
        )
        .await,
    )
    .await;
    assert!(first.contains("Guest10"));
    assert!(!first.contains("Linda"));
    assert!(first.contains("Page 1 of 2"));

    let second = text(
        send(
            &app.router,
            Request::get("/customers?page=1").body(Body::empty()).expect("request"),
        )
        .await,
    )
    .await;
    assert!(second.contains("Linda"));
    assert!(second.contains("Guest00"));
}

#[rstest]
#[case("/customers?page=-3")]
#[case("/customers?page=abc")]
#[tokio::test(flavor = "multi_thread")]
async fn bad_page_numbers_fall_back_to_the_first_page(#[case] uri: &str) {
    let app = test_app().await;
    let response = send(&app.router, Request::get(uri).body(Body::empty()).expect("request")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await;
    assert!(body.contains("Page 1 of 1"));
    assert!(body.contains("Linda"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn single_customer_and_form_views() {
    let app = test_app().await;
    let uri = format!("/customers?customer_id={}", app.seeded.customer.id());
    let single = text(send(&app.router, Request::get(uri).body(Body::empty()).expect("request")).await).await;
    assert!(single.contains("linda.williams@example.org"));

    let form = text(
        send(
            &app.router,
            Request::get("/customers?new=t").body(Body::empty()).expect("request"),
        )
        .await,
    )
    .await;
    assert!(form.contains("<form method=\"post\" action=\"/customers\">"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_customer_is_not_found() {
    let app = test_app().await;
    let response = send(
        &app.router,
        Request::get("/customers?customer_id=77").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn posting_the_form_creates_and_redirects() {
    let app = test_app().await;
    let request = Request::post("/customers")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "first_name=Barbara&last_name=Jones&email=barbara.jones%40example.org&active=on",
        ))
        .expect("request");
    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
        Some(b"/customers".as_slice())
    );
    let created = app
        .registry
        .customers()
        .list(ListQuery::new())
        .await
        .expect("customers");
    let barbara = created
        .iter()
        .find(|customer| customer.first_name() == "Barbara")
        .expect("new customer stored");
    assert!(barbara.is_active());
    assert_eq!(barbara.store_id(), 1);
    assert_eq!(barbara.address_id(), app.seeded.address.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_form_is_unprocessable() {
    let app = test_app().await;
    let request = Request::post("/customers")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("first_name=&last_name=Jones"))
        .expect("request");
    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        app.registry.customers().count().await.expect("count"),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn staff_page_omits_credentials() {
    let app = test_app().await;
    let body = text(send(&app.router, Request::get("/staff").body(Body::empty()).expect("request")).await).await;
    assert!(body.contains("Stephens"));
    assert!(!body.contains("8cb2237d0679ca88db6464eac60da96345513964"));
}

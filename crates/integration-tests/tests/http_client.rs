//! Integration tests for the shared HTTP client.

use secrecy::ExposeSecret;
use serde_json::json;
use shopfront_client::{Level, Locale, Message};
use shopfront_integration_tests::{ACCESS_TOKEN, TestContext};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_stored_token_is_sent_as_bearer() {
    let ctx = TestContext::new().await;
    ctx.sign_in();

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let orders = ctx
        .state
        .api()
        .orders()
        .list()
        .await
        .expect("orders request should succeed");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(418))
        .expect(0)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.state
        .api()
        .orders()
        .list()
        .await
        .expect("anonymous request should succeed");
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects_to_login_once() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    assert_eq!(
        ctx.tokens().access_token().map(|t| t.expose_secret().to_string()).as_deref(),
        Some(ACCESS_TOKEN)
    );

    Mock::given(method("GET"))
        .and(path("/api/cart_items/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .state
        .api()
        .cart()
        .list()
        .await
        .expect_err("401 must surface as an error");

    assert!(err.is_unauthorized());
    assert!(ctx.tokens().access_token().is_none());
    assert!(ctx.tokens().refresh_token().is_none());
    assert_eq!(ctx.state.router().history(), vec!["/login".to_string()]);
    assert_eq!(
        ctx.notifier.messages(Level::Error),
        vec![Message::Unauthorized.text(Locale::En).to_string()]
    );
}

#[tokio::test]
async fn test_server_error_keeps_session() {
    let ctx = TestContext::new().await;
    ctx.sign_in();

    Mock::given(method("GET"))
        .and(path("/api/orders/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .state
        .api()
        .orders()
        .get(3.into())
        .await
        .expect_err("500 must surface as an error");

    assert_eq!(err.status(), Some(500));
    assert!(ctx.tokens().has_access_token());
    assert!(ctx.state.router().history().is_empty());
    assert_eq!(
        ctx.notifier.messages(Level::Error),
        vec![Message::ServerError.text(Locale::En).to_string()]
    );
}

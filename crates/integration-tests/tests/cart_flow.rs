//! Integration tests for the cart store.

use rust_decimal::Decimal;
use serde_json::json;
use shopfront_client::{Level, Locale, Message};
use shopfront_core::{CartItemCreate, CartItemId, ProductId};
use shopfront_integration_tests::{TestContext, cart_line};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_add_refetches_once_and_totals_match() {
    let ctx = TestContext::new().await;
    ctx.sign_in();

    Mock::given(method("POST"))
        .and(path("/api/cart_items/"))
        .and(body_json(json!({"product_id": 5, "quantity": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_line(11, 5, 2, 12.5)))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart_items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            cart_line(10, 3, 1, 99.99),
            cart_line(11, 5, 2, 12.5)
        ])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let cart = ctx.state.cart();
    let added = cart
        .add_to_cart(CartItemCreate {
            product_id: ProductId::new(5),
            quantity: 2,
        })
        .await
        .expect("add should succeed");

    assert_eq!(added.id, CartItemId::new(11));
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), Decimal::new(12499, 2));
    assert_eq!(
        ctx.notifier.messages(Level::Success),
        vec![Message::CartAdded.text(Locale::En).to_string()]
    );
}

#[tokio::test]
async fn test_remove_refetches_and_empties_cart() {
    let ctx = TestContext::new().await;
    ctx.sign_in();

    Mock::given(method("DELETE"))
        .and(path("/api/cart_items/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart_items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let cart = ctx.state.cart();
    cart.remove_from_cart(CartItemId::new(10))
        .await
        .expect("remove should succeed");

    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_price(), Decimal::ZERO);
}

#[tokio::test]
async fn test_add_for_anonymous_user_redirects_to_login() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/cart_items/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
        )
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart_items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let err = ctx
        .state
        .cart()
        .add_to_cart(CartItemCreate {
            product_id: ProductId::new(1),
            quantity: 1,
        })
        .await
        .expect_err("anonymous add must fail");

    assert!(err.is_unauthorized());
    assert_eq!(ctx.state.router().history(), vec!["/login".to_string()]);
    assert_eq!(
        ctx.notifier.messages(Level::Error).last().map(String::as_str),
        Some("Not authenticated")
    );
}

use std::sync::Arc;

use axum::http::{
    HeaderValue, StatusCode,
    header::{HOST, REFERER},
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DbErr, MockExecResult, QueryTrait, Transaction};

use bookstore_domain::flash::FlashCategory;
use bookstore_domain::id::{CartItemId, UserId};
use bookstore_storefront::infra::db::{SELECT_CART_LINES, delete_cart_item, update_cart_item};
use bookstore_testing::client::{body_json, get, location, post_form, send};
use bookstore_testing::session::{MockSession, written_session};

use crate::helpers::{
    app, flash_messages, mock_db, raised_exception, row, shared_app, transaction_log,
};

fn exec_ok(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn should_render_cart_with_total() {
    let line = |item: i32, title: &str, price: Decimal, quantity: i32| {
        row([
            ("cart_item_id", item.into()),
            ("book_id", item.into()),
            ("title", title.into()),
            ("author", "Anon".into()),
            ("price", price.into()),
            ("quantity", quantity.into()),
            ("subtotal", (price * Decimal::from(quantity)).into()),
            ("stock", 10i32.into()),
        ])
    };
    let db = Arc::new(
        mock_db()
            .append_query_results([[
                line(1, "Dune", Decimal::new(1250, 2), 2),
                line(2, "Emma", Decimal::new(500, 2), 1),
            ]])
            .into_connection(),
    );
    let cookie = MockSession::customer(1).cookie();
    let resp = send(shared_app(db.clone()), get("/cart", Some(cookie))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["template"], "cart.html");
    assert_eq!(body["data"]["cart_items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total"], "30.00");
    assert!(transaction_log(db).contains(&Transaction::from_sql_and_values(
        DatabaseBackend::Postgres,
        SELECT_CART_LINES,
        [1i32.into()],
    )));
}

#[tokio::test]
async fn should_clamp_update_above_stock() {
    let db = Arc::new(
        mock_db()
            .append_query_results([[row([("stock", 5i32.into())])]])
            .append_exec_results([exec_ok(1)])
            .into_connection(),
    );
    let cookie = MockSession::customer(1).cookie();
    let resp = send(
        shared_app(db.clone()),
        post_form("/cart/update/10", Some(cookie), &[("quantity", "9")]),
    )
    .await;

    assert_eq!(location(&resp), "/cart");
    let claims = written_session(&resp).unwrap();
    assert_eq!(
        flash_messages(&claims),
        [
            "Only 5 copies available. Quantity set to maximum.",
            "Cart updated successfully."
        ]
    );
    assert_eq!(claims.flashes[0].category, FlashCategory::Warning);
    assert_eq!(claims.flashes[1].category, FlashCategory::Info);
    let update = update_cart_item(UserId(1), CartItemId(10), 5).build(DatabaseBackend::Postgres);
    assert!(transaction_log(db).contains(&Transaction::one(update)));
}

#[tokio::test]
async fn should_reject_quantity_below_one_without_touching_database() {
    let db = Arc::new(mock_db().into_connection());
    let cookie = MockSession::customer(1).cookie();
    let resp = send(
        shared_app(db.clone()),
        post_form("/cart/update/10", Some(cookie), &[("quantity", "0")]),
    )
    .await;

    assert_eq!(location(&resp), "/cart");
    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Quantity must be at least 1."]);
    assert!(transaction_log(db).is_empty());
}

#[tokio::test]
async fn should_reject_non_numeric_quantity() {
    let cookie = MockSession::customer(1).cookie();
    let resp = send(
        app(mock_db().into_connection()),
        post_form("/cart/update/10", Some(cookie), &[("quantity", "lots")]),
    )
    .await;

    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Invalid quantity."]);
}

#[tokio::test]
async fn should_report_item_outside_users_cart() {
    let db = mock_db()
        .append_query_results([Vec::<std::collections::BTreeMap<&str, sea_orm::Value>>::new()])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let resp = send(
        app(db),
        post_form("/cart/update/77", Some(cookie), &[("quantity", "2")]),
    )
    .await;

    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Cart item not found."]);
}

#[tokio::test]
async fn should_remove_only_the_requested_item() {
    let db = Arc::new(
        mock_db()
            .append_exec_results([exec_ok(1)])
            .into_connection(),
    );
    let cookie = MockSession::customer(1).cookie();
    let resp = send(
        shared_app(db.clone()),
        post_form("/cart/remove/10", Some(cookie), &[]),
    )
    .await;

    assert_eq!(location(&resp), "/cart");
    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Book removed from cart."]);
    let delete = delete_cart_item(UserId(1), CartItemId(10)).build(DatabaseBackend::Postgres);
    assert_eq!(delete.values, Some(sea_orm::Values(vec![10i32.into(), 1i32.into()])));
    assert_eq!(transaction_log(db), [Transaction::one(delete)]);
}

#[tokio::test]
async fn should_return_to_referer_after_adding() {
    let db = mock_db()
        .append_exec_results([exec_ok(1)])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let mut req = post_form("/cart/add/3", Some(cookie), &[("quantity", "2")]);
    req.headers_mut()
        .insert(REFERER, HeaderValue::from_static("/search?query=dune"));
    let resp = send(app(db), req).await;

    assert_eq!(location(&resp), "/search?query=dune");
    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Book added to your cart!"]);
}

#[tokio::test]
async fn should_follow_absolute_referer_on_same_host() {
    let db = mock_db()
        .append_exec_results([exec_ok(1)])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let mut req = post_form("/cart/add/3", Some(cookie), &[]);
    req.headers_mut()
        .insert(HOST, HeaderValue::from_static("shop.example.com"));
    req.headers_mut().insert(
        REFERER,
        HeaderValue::from_static("https://shop.example.com/search?query=dune"),
    );
    let resp = send(app(db), req).await;

    assert_eq!(location(&resp), "/search?query=dune");
}

#[tokio::test]
async fn should_ignore_referer_from_another_site() {
    let cookie = MockSession::customer(1).cookie();
    for referer in ["https://evil.example.net/phish", "//evil.example.net/phish"] {
        let db = mock_db()
            .append_exec_results([exec_ok(1)])
            .into_connection();
        let mut req = post_form("/cart/add/3", Some(cookie.clone()), &[]);
        req.headers_mut()
            .insert(HOST, HeaderValue::from_static("shop.example.com"));
        req.headers_mut()
            .insert(REFERER, HeaderValue::from_static(referer));
        let resp = send(app(db), req).await;

        assert_eq!(location(&resp), "/books", "referer {referer}");
    }
}

#[tokio::test]
async fn should_keep_add_to_cart_error_generic_when_procedure_raises() {
    let db = mock_db()
        .append_exec_errors([raised_exception("Not enough stock for book 3")])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let resp = send(app(db), post_form("/cart/add/3", Some(cookie), &[])).await;

    let claims = written_session(&resp).unwrap();
    assert_eq!(
        flash_messages(&claims),
        ["Error adding to cart: Could not add item."]
    );
}

#[tokio::test]
async fn should_flash_generic_error_when_add_fails() {
    let db = mock_db()
        .append_exec_errors([DbErr::Custom("deadlock detected".into())])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let resp = send(app(db), post_form("/cart/add/3", Some(cookie), &[])).await;

    assert_eq!(location(&resp), "/books");
    let claims = written_session(&resp).unwrap();
    assert_eq!(
        flash_messages(&claims),
        ["Error adding to cart: Could not add item."]
    );
}

#[tokio::test]
async fn should_redirect_to_profile_after_checkout() {
    let db = mock_db()
        .append_exec_results([exec_ok(1)])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let resp = send(app(db), post_form("/checkout", Some(cookie), &[])).await;

    assert_eq!(location(&resp), "/profile");
    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Order placed successfully! ✅"]);
}

#[tokio::test]
async fn should_hide_driver_errors_on_checkout() {
    let db = mock_db()
        .append_exec_errors([DbErr::Custom("relation \"orders\" does not exist".into())])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let resp = send(app(db), post_form("/checkout", Some(cookie), &[])).await;

    assert_eq!(location(&resp), "/cart");
    let claims = written_session(&resp).unwrap();
    assert_eq!(
        flash_messages(&claims),
        ["Error placing order: could not place order"]
    );
}

#[tokio::test]
async fn should_show_procedure_message_when_checkout_is_rejected() {
    let db = mock_db()
        .append_exec_errors([raised_exception("Insufficient stock")])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let resp = send(app(db), post_form("/checkout", Some(cookie), &[])).await;

    assert_eq!(location(&resp), "/cart");
    let claims = written_session(&resp).unwrap();
    assert_eq!(
        flash_messages(&claims),
        ["Error placing order: Insufficient stock"]
    );
    assert_eq!(claims.flashes[0].category, FlashCategory::Danger);
}

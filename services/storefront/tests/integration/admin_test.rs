use axum::http::StatusCode;
use rust_decimal::Decimal;
use sea_orm::MockExecResult;

use bookstore_storefront_schema::books;
use bookstore_testing::client::{body_json, get, location, post_form, send};
use bookstore_testing::session::{MockSession, written_session};

use crate::helpers::{app, flash_messages, mock_db, page_flashes};

fn dune() -> books::Model {
    books::Model {
        book_id: 3,
        title: "Dune".into(),
        author: "Frank Herbert".into(),
        category: Some("Sci-Fi".into()),
        price: Decimal::new(1250, 2),
        quantity: 5,
    }
}

#[tokio::test]
async fn should_render_search_results_for_customers() {
    let db = mock_db()
        .append_query_results([vec![dune()]])
        .into_connection();
    let cookie = MockSession::customer(1).cookie();
    let resp = send(app(db), get("/search?query=dune", Some(cookie))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["template"], "book_management.html");
    assert_eq!(body["data"]["search_query"], "dune");
    assert_eq!(body["data"]["books"][0]["title"], "Dune");
    assert_eq!(body["data"]["books"][0]["price"], 12.5);
    assert_eq!(body["user"]["role"], "customer");
}

#[tokio::test]
async fn should_add_book() {
    let db = mock_db()
        .append_query_results([vec![dune()]])
        .into_connection();
    let cookie = MockSession::admin(9).cookie();
    let resp = send(
        app(db),
        post_form(
            "/admin/books/add",
            Some(cookie),
            &[
                ("title", "Dune"),
                ("author", "Frank Herbert"),
                ("category", "Sci-Fi"),
                ("price", "12.50"),
                ("quantity", "5"),
            ],
        ),
    )
    .await;

    assert_eq!(location(&resp), "/admin/books");
    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Book added successfully!"]);
}

#[tokio::test]
async fn should_rerender_form_on_bad_price() {
    let cookie = MockSession::admin(9).cookie();
    let resp = send(
        app(mock_db().into_connection()),
        post_form(
            "/admin/books/add",
            Some(cookie),
            &[
                ("title", "Dune"),
                ("author", "Frank Herbert"),
                ("price", "cheap"),
                ("quantity", "5"),
            ],
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["template"], "add_book.html");
    assert_eq!(page_flashes(&body), ["Invalid price or quantity."]);
}

#[tokio::test]
async fn should_render_update_form_with_book() {
    let db = mock_db()
        .append_query_results([vec![dune()]])
        .into_connection();
    let cookie = MockSession::admin(9).cookie();
    let resp = send(app(db), get("/admin/books/update/3", Some(cookie))).await;

    let body = body_json(resp).await;
    assert_eq!(body["template"], "update_book.html");
    assert_eq!(body["data"]["book"]["book_id"], 3);
}

#[tokio::test]
async fn should_redirect_when_book_to_update_is_missing() {
    let db = mock_db()
        .append_query_results([Vec::<books::Model>::new()])
        .into_connection();
    let cookie = MockSession::admin(9).cookie();
    let resp = send(app(db), get("/admin/books/update/99", Some(cookie))).await;

    assert_eq!(location(&resp), "/admin/books");
    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Book not found."]);
}

#[tokio::test]
async fn should_delete_book() {
    let db = mock_db()
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let cookie = MockSession::admin(9).cookie();
    let resp = send(
        app(db),
        post_form("/admin/books/delete/3", Some(cookie), &[]),
    )
    .await;

    assert_eq!(location(&resp), "/admin/books");
    let claims = written_session(&resp).unwrap();
    assert_eq!(flash_messages(&claims), ["Book deleted successfully!"]);
}

#[tokio::test]
async fn should_serve_reports_without_login() {
    let resp = send(app(mock_db().into_connection()), get("/reports", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["template"], "reports.html");
}

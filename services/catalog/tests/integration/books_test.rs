use axum::http::StatusCode;
use sea_orm::EntityTrait;

use bookstore_catalog_schema::books;
use bookstore_testing::client::{body_json, get, location, post_form, send};

use crate::helpers::TestDb;

#[tokio::test]
async fn should_list_added_book() {
    let test_db = TestDb::new().await;

    let resp = send(
        test_db.app(),
        post_form("/add", None, &[("title", "T"), ("author", "A"), ("year", "2020")]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let resp = send(test_db.app(), get("/", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["template"], "index.html");
    let listed = body["data"]["books"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "T");
    assert_eq!(listed[0]["author"], "A");
    assert_eq!(listed[0]["year"], 2020);
}

#[tokio::test]
async fn should_edit_book() {
    let test_db = TestDb::new().await;
    send(
        test_db.app(),
        post_form("/add", None, &[("title", "T"), ("author", "A"), ("year", "2020")]),
    )
    .await;

    let resp = send(test_db.app(), get("/edit/1", None)).await;
    let body = body_json(resp).await;
    assert_eq!(body["template"], "edit_book.html");
    assert_eq!(body["data"]["book"]["title"], "T");

    let resp = send(
        test_db.app(),
        post_form(
            "/edit/1",
            None,
            &[("title", "T2"), ("author", "A2"), ("year", "2021")],
        ),
    )
    .await;
    assert_eq!(location(&resp), "/");

    let book = books::Entity::find_by_id(1)
        .one(&*test_db.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.title, "T2");
    assert_eq!(book.year, 2021);
}

#[tokio::test]
async fn should_delete_book() {
    let test_db = TestDb::new().await;
    send(
        test_db.app(),
        post_form("/add", None, &[("title", "T"), ("author", "A"), ("year", "2020")]),
    )
    .await;

    let resp = send(test_db.app(), get("/delete/1", None)).await;
    assert_eq!(location(&resp), "/");
    let remaining = books::Entity::find().all(&*test_db.db).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn should_reject_non_numeric_year() {
    let test_db = TestDb::new().await;
    let resp = send(
        test_db.app(),
        post_form("/add", None, &[("title", "T"), ("author", "A"), ("year", "soon")]),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["kind"], "INVALID_YEAR");
    let stored = books::Entity::find().all(&*test_db.db).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_book() {
    let test_db = TestDb::new().await;
    let resp = send(test_db.app(), get("/edit/42", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_report_ready_when_database_answers() {
    let test_db = TestDb::new().await;
    let resp = send(test_db.app(), get("/readyz", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

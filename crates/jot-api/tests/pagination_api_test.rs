//! Listing, pagination, and title filter tests.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{create_note, request, test_app};

#[tokio::test]
async fn test_list_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = request(&app, "GET", "/notes", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 20);
    assert!(body["notes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    for title in ["first", "second", "third"] {
        create_note(&app, title).await;
    }

    let (status, body) = request(&app, "GET", "/notes", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let ids: Vec<i64> = body["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_pagination_window() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    for i in 1..=5 {
        create_note(&app, &format!("note {}", i)).await;
    }

    let (status, body) = request(&app, "GET", "/notes?page=2&per_page=2", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 2);
    let ids: Vec<i64> = body["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2]);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    create_note(&app, "only one").await;

    let (status, body) = request(&app, "GET", "/notes?page=5&per_page=10", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert!(body["notes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    create_note(&app, "only one").await;

    let uri = format!("/notes?page={}&per_page=100", i64::MAX / 2);
    let (status, body) = request(&app, "GET", &uri, None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert!(body["notes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_pagination_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = request(&app, "GET", "/notes?page=0", None, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "page must be >= 1");

    let (status, body) = request(&app, "GET", "/notes?per_page=0", None, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "per_page must be >= 1");
}

#[tokio::test]
async fn test_per_page_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = request(&app, "GET", "/notes?per_page=500", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["per_page"], 100);
}

#[tokio::test]
async fn test_title_filter_is_case_insensitive_and_counts_matches() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    create_note(&app, "Groceries: milk").await;
    create_note(&app, "Call the plumber").await;
    create_note(&app, "more GROCERIES").await;

    let (status, body) = request(&app, "GET", "/notes?q=groceries", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let titles: Vec<&str> = body["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["more GROCERIES", "Groceries: milk"]);
}

#[tokio::test]
async fn test_filter_with_no_matches() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    create_note(&app, "something").await;

    let (status, body) = request(&app, "GET", "/notes?q=zzz", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert!(body["notes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_filter_combines_with_pagination() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    for i in 1..=4 {
        create_note(&app, &format!("task {}", i)).await;
    }
    create_note(&app, "unrelated").await;

    let (status, body) = request(&app, "GET", "/notes?q=task&page=2&per_page=3", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(body["notes"].as_array().unwrap().len(), 1);
    assert_eq!(body["notes"][0]["title"], "task 1");
}

// Query values like "abc" fail i64 deserialization inside the extractor.
#[tokio::test]
async fn test_non_numeric_page_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, _) = common::request_raw(&app, "GET", "/notes?page=abc", None, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

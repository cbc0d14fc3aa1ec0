use super::{ActivitySource, FetchError, HttpActivityClient, PageRequest};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::models::{ActivityFeed, TransactionSource};

type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

struct MockServer {
    base_url: String,
    seen: Seen,
    handle: JoinHandle<()>
}

impl MockServer {
    async fn start() -> Result<Self> {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));

        let router = Router::new()
            .route("/analytics/users/:player/transactions", get({
                let seen = seen.clone();
                move |Path(player): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                    seen.lock().expect("mock lock").push(("transactions".to_string(), params));
                    Json(json!({
                        "success": true,
                        "data": [{"id": format!("{player}-t1"), "roundId": "r1", "betAmount": "5", "status": "completed"}],
                        "meta": {"total": 11, "page": 1, "page_size": 1, "pages": 11}
                    }))
                }
            }))
            .route("/deposits", get({
                let seen = seen.clone();
                move |Query(params): Query<HashMap<String, String>>| async move {
                    seen.lock().expect("mock lock").push(("deposits".to_string(), params));
                    Json(json!([{"id": "d1", "amount": "20"}]))
                }
            }))
            .route("/players/:player/manual-funds", get({
                let seen = seen.clone();
                move |Query(params): Query<HashMap<String, String>>| async move {
                    seen.lock().expect("mock lock").push(("manual-funds".to_string(), params));
                    Json(json!({"data": {"manual_funds": [{"id": 1, "type": "remove_fund", "amount": 3}], "pagination": {"total_count": 1}}}))
                }
            }))
            .route("/analytics/users/:player/tips", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
            .route("/withdrawals", get(|| async { "not json" }));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { base_url, seen, handle })
    }

    fn requests(&self, route: &str) -> Vec<HashMap<String, String>> {
        self.seen.lock().expect("mock lock").iter()
            .filter(|(seen_route, _)| seen_route == route)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client(server: &MockServer) -> Result<HttpActivityClient> {
    Ok(HttpActivityClient::new(&server.base_url, Duration::from_secs(5))?)
}

#[tokio::test]
async fn test_analytics_feed_forwards_filters_and_reads_meta() -> Result<()> {
    let server = MockServer::start().await?;
    let request = PageRequest {
        status: Some("pending".to_string()),
        search: Some("abc".to_string()),
        ..PageRequest::new(20, 10)
    };

    let page = client(&server)?.fetch_page("42", ActivityFeed::Analytics, &request).await?;

    assert_eq!(page.feed, ActivityFeed::Analytics);
    assert_eq!(page.transactions.len(), 1);
    assert_eq!(page.transactions[0].id.as_deref(), Some("42-t1"));
    assert_eq!(page.reported_total(), 11);

    let params = &server.requests("transactions")[0];

    assert_eq!(params.get("limit").map(String::as_str), Some("10"));
    assert_eq!(params.get("offset").map(String::as_str), Some("20"));
    assert_eq!(params.get("status").map(String::as_str), Some("pending"));
    assert_eq!(params.get("search").map(String::as_str), Some("abc"));
    assert!(!params.contains_key("transaction_type"));

    Ok(())
}

#[tokio::test]
async fn test_deposit_feed_searches_by_player_and_accepts_bare_arrays() -> Result<()> {
    let server = MockServer::start().await?;

    let page = client(&server)?.fetch_page("42", ActivityFeed::Deposits, &PageRequest::new(0, 25)).await?;

    assert_eq!(page.transactions.len(), 1);
    assert_eq!(page.transactions[0].source, TransactionSource::Deposit);
    assert!(page.meta.is_none());
    assert_eq!(page.reported_total(), 1);
    assert_eq!(server.requests("deposits")[0].get("search").map(String::as_str), Some("42"));

    Ok(())
}

#[tokio::test]
async fn test_manual_funds_feed_translates_offset_to_page_number() -> Result<()> {
    let server = MockServer::start().await?;

    let page = client(&server)?.fetch_page("42", ActivityFeed::ManualFunds, &PageRequest::new(50, 25)).await?;

    assert_eq!(page.transactions[0].source, TransactionSource::ManualRemove);
    assert_eq!(page.transactions[0].id.as_deref(), Some("1"));

    let params = &server.requests("manual-funds")[0];

    assert_eq!(params.get("page").map(String::as_str), Some("3"));
    assert_eq!(params.get("per_page").map(String::as_str), Some("25"));
    assert!(!params.contains_key("offset"));

    Ok(())
}

#[tokio::test]
async fn test_error_status_is_reported() -> Result<()> {
    let server = MockServer::start().await?;

    let result = client(&server)?.fetch_page("42", ActivityFeed::Tips, &PageRequest::new(0, 25)).await;

    assert!(matches!(result, Err(FetchError::Status { feed: ActivityFeed::Tips, status: 500 })));

    Ok(())
}

#[tokio::test]
async fn test_non_json_body_is_a_decode_error() -> Result<()> {
    let server = MockServer::start().await?;

    let result = client(&server)?.fetch_page("42", ActivityFeed::Withdrawals, &PageRequest::new(0, 25)).await;

    assert!(matches!(result, Err(FetchError::Decode { feed: ActivityFeed::Withdrawals, .. })));

    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_a_status_error() -> Result<()> {
    let server = MockServer::start().await?;

    let result = client(&server)?.fetch_page("42", ActivityFeed::EarnedRakeback, &PageRequest::new(0, 25)).await;

    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));

    Ok(())
}

#[test]
fn test_invalid_base_url_is_rejected() {
    assert!(matches!(HttpActivityClient::new("not a url", Duration::from_secs(1)), Err(FetchError::InvalidBaseUrl(_))));
    assert!(matches!(HttpActivityClient::new("mailto:ops@example.com", Duration::from_secs(1)), Err(FetchError::InvalidBaseUrl(_))));
}

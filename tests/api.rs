//! Integration tests for the occupancy API.
//!
//! Each test stands up the full router on a real TCP socket with a fresh
//! sqlite file and talks to it over HTTP, the same way the watch binary and
//! the simulator do.

use std::net::SocketAddr;
use std::time::Duration;

use occupancy_backend::config::{
    ApiConfig, Config, DatabaseConfig, PollerConfig, SimulatorConfig,
};
use occupancy_backend::models::Record;
use occupancy_backend::poller::{self, Poller};
use occupancy_backend::{db, routes, AppContext};
use serde_json::{json, Value};

fn test_config(dir: &std::path::Path) -> Config {
    Config {
        api: ApiConfig {
            bind: "127.0.0.1:0".to_string(),
        },
        database: DatabaseConfig {
            path: dir.join("test.db").display().to_string(),
        },
        poller: PollerConfig {
            endpoint: String::new(),
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(1),
        },
        simulator: SimulatorConfig {
            endpoint: String::new(),
            capacity: 40,
            steps: 1,
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(1),
        },
        thingspeak: None,
    }
}

async fn start_server(dir: &std::path::Path) -> SocketAddr {
    let config = test_config(dir);
    let pool = db::connect(&config.database).await.unwrap();
    let router = routes::router(AppContext { config, pool });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    addr
}

async fn post_reading(
    client: &reqwest::Client,
    addr: SocketAddr,
    count: i64,
    capacity: i64,
) -> reqwest::Response {
    client
        .post(format!("http://{addr}/update_count"))
        .json(&json!({ "count": count, "capacity": capacity }))
        .send()
        .await
        .unwrap()
}

fn poller_config(addr: SocketAddr) -> PollerConfig {
    PollerConfig {
        endpoint: format!("http://{addr}/dashboard_data"),
        interval: Duration::from_millis(50),
        timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn ingested_readings_come_back_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;
    let client = reqwest::Client::new();

    for count in [1, 2, 3] {
        let response = post_reading(&client, addr, count, 40).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }

    let rows: Vec<Record> = client
        .get(format!("http://{addr}/dashboard_data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let counts: Vec<i64> = rows.iter().map(|r| r.count).collect();
    assert_eq!(counts, [3, 2, 1]);
    assert!(rows.iter().all(|r| r.capacity == 40));
}

#[tokio::test]
async fn bad_payload_is_rejected_with_error_body() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/update_count"))
        .json(&json!({ "count": "three", "capacity": 40 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "error", "message": "bad payload" }));

    // nothing should have been stored
    let rows: Vec<Record> = client
        .get(format!("http://{addr}/dashboard_data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn non_json_body_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/update_count"))
        .header("content-type", "application/json")
        .body("not json at all")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn dashboard_data_caps_at_latest_hundred() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;
    let client = reqwest::Client::new();

    for count in 1..=101 {
        post_reading(&client, addr, count, 120).await;
    }

    let rows: Vec<Record> = client
        .get(format!("http://{addr}/dashboard_data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(rows.len(), 100);
    assert_eq!(rows[0].count, 101);
    assert_eq!(rows[99].count, 2);
    assert!(rows.iter().all(|r| r.count != 1), "oldest row should fall off");
}

#[tokio::test]
async fn dashboard_page_renders_rows() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;
    let client = reqwest::Client::new();

    post_reading(&client, addr, 12, 40).await;

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let page = response.text().await.unwrap();
    assert!(page.contains("Bus Occupancy Dashboard"));
    assert!(page.contains("<td>12</td>"));
    assert!(page.contains("<td>40</td>"));
}

#[tokio::test]
async fn poller_refreshes_from_live_server() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;
    let client = reqwest::Client::new();

    post_reading(&client, addr, 7, 40).await;

    let mut poller = Poller::new(&poller_config(addr)).unwrap();
    poller.refresh().await;

    assert_eq!(poller.rows().len(), 1);
    assert_eq!(poller.rows()[0].count, 7);
    assert_eq!(poller.rows()[0].capacity, 40);
    assert!(poller.status().starts_with("Last updated: "));
    // stored timestamps come back formatted for display
    chrono::NaiveDateTime::parse_from_str(&poller.rows()[0].time, "%Y-%m-%d %H:%M:%S").unwrap();
}

#[tokio::test]
async fn watch_loop_runs_and_stops_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;
    let client = reqwest::Client::new();

    post_reading(&client, addr, 3, 40).await;

    let result = poller::run_until(
        poller_config(addr),
        tokio::time::sleep(Duration::from_millis(200)),
    )
    .await;
    assert!(result.is_ok());
}

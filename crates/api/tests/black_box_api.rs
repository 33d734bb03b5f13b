use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use vaxreg_api::app::{build_app, services::build_services};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, fresh in-memory stores, ephemeral port.
        let app = build_app(Arc::new(build_services()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let res = client.post(url).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap_or(Value::Null))
}

async fn get(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap_or(Value::Null))
}

async fn register_acme_with_two_lots(srv: &TestServer, client: &reqwest::Client) {
    let (status, _) = post(
        client,
        srv.url("/vaccines"),
        json!({ "manufacturer": "Acme", "required_doses": 2, "interval_days": 21 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for doses in [5, 3] {
        let (status, _) = post(
            client,
            srv.url("/vaccines/Acme/lots"),
            json!({ "initial_doses": doses, "expires_on": "2027-01-31" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_listings_are_not_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = get(&client, srv.url("/vaccines")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get(&client, srv.url("/lots")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn vaccine_registration_and_validation() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = post(
        &client,
        srv.url("/vaccines"),
        json!({ "manufacturer": "Acme", "required_doses": 2, "interval_days": 90, "initial_doses": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["manufacturer"], "Acme");
    assert_eq!(body["doses_received"], 10);

    let (status, body) = post(
        &client,
        srv.url("/vaccines"),
        json!({ "manufacturer": "Acme", "required_doses": 1, "interval_days": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_vaccine");

    let (status, body) = post(
        &client,
        srv.url("/vaccines"),
        json!({ "manufacturer": "Bravo", "required_doses": 3, "interval_days": 21 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_dose_count");

    let (status, body) = post(
        &client,
        srv.url("/vaccines"),
        json!({ "manufacturer": "Bravo", "required_doses": 2, "interval_days": 91 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_interval");

    let (status, body) = get(&client, srv.url("/vaccines/Acme")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["interval_days"], 90);
}

#[tokio::test]
async fn withdrawal_lifecycle_across_lots() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register_acme_with_two_lots(&srv, &client).await;

    let (status, body) = post(&client, srv.url("/vaccines/Acme/withdrawals"), json!({ "count": 6 })).await;
    assert_eq!(status, StatusCode::OK);
    let lots = body["lots"].as_array().unwrap();
    assert_eq!(lots.len(), 2);
    assert_eq!(lots[0]["sequence"], 1);
    assert_eq!(lots[0]["doses_remaining"], 0);
    assert_eq!(lots[1]["sequence"], 2);
    assert_eq!(lots[1]["doses_remaining"], 2);

    let (status, body) = post(&client, srv.url("/vaccines/Acme/withdrawals"), json!({ "count": 10 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "insufficient_stock");

    let (status, body) = get(&client, srv.url("/vaccines/Acme/lots")).await;
    assert_eq!(status, StatusCode::OK);
    let remaining: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["doses_remaining"].as_u64().unwrap())
        .collect();
    assert_eq!(remaining, vec![0, 2]);
    assert_eq!(body[0]["expires_on"], "2027-01-31");

    let (status, body) = get(&client, srv.url("/vaccines/Acme/stock?requested=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_doses"], 2);
    assert_eq!(body["sufficient"], true);
}

#[tokio::test]
async fn unknown_manufacturer_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = post(&client, srv.url("/vaccines/Ghost/withdrawals"), json!({ "count": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "vaccine_not_found");

    let (status, _) = post(&client, srv.url("/vaccines/Ghost/lots"), json!({ "initial_doses": 5 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&client, srv.url("/vaccines/Ghost/lots")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&client, srv.url("/vaccines/Ghost/stock")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_counts_are_bad_requests() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register_acme_with_two_lots(&srv, &client).await;

    let (status, body) = post(&client, srv.url("/vaccines/Acme/withdrawals"), json!({ "count": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, _) = post(&client, srv.url("/vaccines/Acme/lots"), json!({ "initial_doses": -4 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&client, srv.url("/lots")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

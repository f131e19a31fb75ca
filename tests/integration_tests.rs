//! 실행 중인 경매 서비스를 대상으로 하는 테스트
//!
//! `AUCTION_SERVICE_URL` (기본값 http://localhost:7001) 에 서비스가 떠 있어야 한다.
//! `cargo test -- --ignored` 로 실행한다.
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("AUCTION_SERVICE_URL").unwrap_or_else(|_| "http://localhost:7001".to_string())
}

/// 테스트용 경매 생성
async fn create_test_auction(client: &Client) -> Value {
    let response = client
        .post(format!("{}/api/auctions", base_url()))
        .json(&json!({
            "Make": "Ford",
            "Model": "Mustang",
            "Year": 2020,
            "Color": "Red",
            "Mileage": 15000
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("location"));
    response.json().await.expect("Failed to parse auction")
}

/// 생성 후 조회
#[tokio::test]
#[ignore = "requires a running auction service"]
async fn test_create_and_get_auction() {
    let client = Client::new();
    let created = create_test_auction(&client).await;

    let fetched: Value = client
        .get(format!("{}/api/auctions/{}", base_url(), created["id"].as_str().unwrap()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse auction");

    assert_eq!(fetched, created);
}

/// 0 값 패치는 기존 값 유지
#[tokio::test]
#[ignore = "requires a running auction service"]
async fn test_zero_patch_keeps_values() {
    let client = Client::new();
    let created = create_test_auction(&client).await;
    let url = format!("{}/api/auctions/{}", base_url(), created["id"].as_str().unwrap());

    let response = client
        .put(&url)
        .json(&json!({ "Year": 0, "Mileage": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["year"], 2020);
    assert_eq!(fetched["mileage"], 15000);
}

/// 삭제 후 조회는 404
#[tokio::test]
#[ignore = "requires a running auction service"]
async fn test_delete_auction() {
    let client = Client::new();
    let created = create_test_auction(&client).await;
    let url = format!("{}/api/auctions/{}", base_url(), created["id"].as_str().unwrap());

    let response = client.delete(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// 목록은 제조사 오름차순
#[tokio::test]
#[ignore = "requires a running auction service"]
async fn test_list_is_ordered() {
    let client = Client::new();
    create_test_auction(&client).await;

    let auctions: Vec<Value> = client
        .get(format!("{}/api/auctions", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let makes: Vec<&str> = auctions
        .iter()
        .map(|auction| auction["make"].as_str().unwrap())
        .collect();
    assert!(makes.windows(2).all(|pair| pair[0].as_bytes() <= pair[1].as_bytes()));
}

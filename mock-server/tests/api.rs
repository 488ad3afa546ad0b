use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Company, Driver};
use tower::ServiceExt;

const API_KEY: &str = "test-api-key";
const STEAM_ID: &str = "76561198000000000";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, format!("Api-Key {API_KEY}"))
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Api-Key {API_KEY}"))
        .body(String::new())
        .unwrap()
}

fn add_request(steam_id: &str) -> Request<String> {
    json_request(
        "POST",
        "/v1/drivers",
        &format!(r#"{{"steam_id":"{steam_id}"}}"#),
    )
}

// --- auth ---

#[tokio::test]
async fn request_without_api_key_is_unauthorized() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(Request::builder().uri("/v1/me").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_with_wrong_api_key_is_unauthorized() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/v1/me")
                .header(http::header::AUTHORIZATION, "Api-Key wrong-key")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- company profile ---

#[tokio::test]
async fn me_returns_company_profile() {
    let app = app(API_KEY);
    let resp = app.oneshot(get_request("/v1/me")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let company: Company = body_json(resp).await;
    assert_eq!(company.name, "Mock Logistics");
    assert_eq!(company.driver_count.current, 0);
    assert_eq!(company.driver_count.max, 500);
}

#[tokio::test]
async fn driver_count_tracks_additions() {
    let app = app(API_KEY);
    let resp = app.clone().oneshot(add_request(STEAM_ID)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(get_request("/v1/me")).await.unwrap();
    let company: Company = body_json(resp).await;
    assert_eq!(company.driver_count.current, 1);
}

// --- add ---

#[tokio::test]
async fn add_driver_returns_201() {
    let app = app(API_KEY);
    let resp = app.oneshot(add_request(STEAM_ID)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let driver: Driver = body_json(resp).await;
    assert_eq!(driver.steam_id, STEAM_ID);
    assert!(!driver.is_banned);
    assert!(!driver.settings.eut2.job_logging);
}

#[tokio::test]
async fn add_duplicate_driver_conflicts() {
    let app = app(API_KEY);
    let resp = app.clone().oneshot(add_request(STEAM_ID)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(add_request(STEAM_ID)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn add_empty_steam_id_is_rejected() {
    let app = app(API_KEY);
    let resp = app.oneshot(add_request("")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_missing_steam_id_field_is_rejected() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(json_request("POST", "/v1/drivers", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- remove ---

#[tokio::test]
async fn remove_driver_returns_200_with_empty_body() {
    let app = app(API_KEY);
    app.clone().oneshot(add_request(STEAM_ID)).await.unwrap();

    let resp = app
        .oneshot(json_request(
            "DELETE",
            "/v1/drivers",
            &format!(r#"{{"steam_id":"{STEAM_ID}"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn remove_unknown_driver_returns_404() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(json_request(
            "DELETE",
            "/v1/drivers",
            &format!(r#"{{"steam_id":"{STEAM_ID}"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- details ---

#[tokio::test]
async fn details_returns_registered_driver() {
    let app = app(API_KEY);
    let resp = app.clone().oneshot(add_request(STEAM_ID)).await.unwrap();
    let added: Driver = body_json(resp).await;

    let resp = app
        .oneshot(get_request(&format!("/v1/drivers/{STEAM_ID}/details")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Driver = body_json(resp).await;
    assert_eq!(fetched, added);
}

#[tokio::test]
async fn details_unknown_driver_returns_404() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(get_request(&format!("/v1/drivers/{STEAM_ID}/details")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- manage ---

#[tokio::test]
async fn manage_applies_partial_toggles() {
    let app = app(API_KEY);
    app.clone().oneshot(add_request(STEAM_ID)).await.unwrap();

    let resp = app
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/drivers/{STEAM_ID}/manage"),
            r#"{"options":{"eut2_job_logging":true,"ats_live_tracking":true}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let driver: Driver = body_json(resp).await;
    assert!(driver.settings.eut2.job_logging);
    assert!(driver.settings.ats.live_tracking);
    // toggles not named in the request stay untouched
    assert!(!driver.settings.eut2.live_tracking);
    assert!(!driver.settings.ats.job_logging);
}

#[tokio::test]
async fn manage_unknown_driver_returns_404() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/drivers/{STEAM_ID}/manage"),
            r#"{"options":{}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

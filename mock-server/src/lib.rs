use std::sync::atomic::{AtomicU64, Ordering};
use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Driver {
    pub id: u64,
    pub steam_id: String,
    pub username: String,
    pub profile_photo_url: String,
    pub client: DriverClient,
    pub settings: DriverSettings,
    pub is_banned: bool,
    pub last_active: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverClient {
    pub is_installed: bool,
    pub version: ClientVersion,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientVersion {
    pub version: String,
    pub branch: String,
    pub platform: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverSettings {
    pub eut2: TitleSettings,
    pub ats: TitleSettings,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleSettings {
    pub job_logging: bool,
    pub live_tracking: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub logo_url: String,
    pub discord_rpc: DiscordRpc,
    pub driver_count: DriverCount,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscordRpc {
    pub eut2_app_id: String,
    pub ats_app_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DriverCount {
    pub current: u32,
    pub max: u32,
}

/// Body for `POST /drivers` and `DELETE /drivers`.
#[derive(Deserialize)]
pub struct DriverRef {
    pub steam_id: String,
}

/// Body for `PATCH /drivers/{steam_id}/manage`.
#[derive(Deserialize)]
pub struct ManageRequest {
    pub options: ManageOptions,
}

#[derive(Default, Deserialize)]
pub struct ManageOptions {
    pub eut2_job_logging: Option<bool>,
    pub eut2_live_tracking: Option<bool>,
    pub ats_job_logging: Option<bool>,
    pub ats_live_tracking: Option<bool>,
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<String>,
    drivers: Arc<RwLock<HashMap<String, Driver>>>,
    next_id: Arc<AtomicU64>,
}

/// Build the mock TrackSim API, serving the v1 surface under `/v1` and
/// rejecting requests whose `Authorization` header is not
/// `Api-Key <api_key>`.
pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::new(api_key.to_string()),
        drivers: Arc::new(RwLock::new(HashMap::new())),
        next_id: Arc::new(AtomicU64::new(1)),
    };
    Router::new()
        .nest(
            "/v1",
            Router::new()
                .route("/me", get(company_profile))
                .route("/drivers", post(add_driver).delete(remove_driver))
                .route("/drivers/{steam_id}/details", get(driver_details))
                .route("/drivers/{steam_id}/manage", patch(manage_driver)),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Api-Key {}", state.api_key);
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value.to_str().ok() == Some(expected.as_str()) => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn new_driver(id: u64, steam_id: String) -> Driver {
    Driver {
        id,
        steam_id,
        username: format!("driver_{id}"),
        profile_photo_url: format!("https://static.tracksim.test/avatars/{id}.png"),
        client: DriverClient {
            is_installed: false,
            version: ClientVersion {
                version: "0.0.0".to_string(),
                branch: "stable".to_string(),
                platform: "win64".to_string(),
            },
        },
        settings: DriverSettings::default(),
        is_banned: false,
        last_active: "2024-01-01T00:00:00Z".to_string(),
    }
}

async fn company_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Company>, StatusCode> {
    authorize(&state, &headers)?;
    let current = state.drivers.read().await.len() as u32;
    Ok(Json(Company {
        id: 1,
        name: "Mock Logistics".to_string(),
        logo_url: "https://static.tracksim.test/logo.png".to_string(),
        discord_rpc: DiscordRpc {
            eut2_app_id: "100000000000000001".to_string(),
            ats_app_id: "100000000000000002".to_string(),
        },
        driver_count: DriverCount { current, max: 500 },
    }))
}

async fn add_driver(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<DriverRef>,
) -> Result<(StatusCode, Json<Driver>), StatusCode> {
    authorize(&state, &headers)?;
    if input.steam_id.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut drivers = state.drivers.write().await;
    if drivers.contains_key(&input.steam_id) {
        return Err(StatusCode::CONFLICT);
    }
    let id = state.next_id.fetch_add(1, Ordering::Relaxed);
    let driver = new_driver(id, input.steam_id.clone());
    drivers.insert(input.steam_id, driver.clone());
    Ok((StatusCode::CREATED, Json(driver)))
}

async fn remove_driver(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<DriverRef>,
) -> Result<StatusCode, StatusCode> {
    authorize(&state, &headers)?;
    state
        .drivers
        .write()
        .await
        .remove(&input.steam_id)
        .map(|_| StatusCode::OK)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn driver_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(steam_id): Path<String>,
) -> Result<Json<Driver>, StatusCode> {
    authorize(&state, &headers)?;
    let drivers = state.drivers.read().await;
    drivers
        .get(&steam_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn manage_driver(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(steam_id): Path<String>,
    Json(input): Json<ManageRequest>,
) -> Result<Json<Driver>, StatusCode> {
    authorize(&state, &headers)?;
    let mut drivers = state.drivers.write().await;
    let driver = drivers.get_mut(&steam_id).ok_or(StatusCode::NOT_FOUND)?;
    let options = input.options;
    if let Some(value) = options.eut2_job_logging {
        driver.settings.eut2.job_logging = value;
    }
    if let Some(value) = options.eut2_live_tracking {
        driver.settings.eut2.live_tracking = value;
    }
    if let Some(value) = options.ats_job_logging {
        driver.settings.ats.job_logging = value;
    }
    if let Some(value) = options.ats_live_tracking {
        driver.settings.ats.live_tracking = value;
    }
    Ok(Json(driver.clone()))
}

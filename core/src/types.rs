//! Domain DTOs for the TrackSim API.
//!
//! # Design
//! Field names match the wire format exactly — no serde renames — so
//! decoded values are the response body verbatim. The mock-server crate
//! defines its own copies of these shapes; integration tests catch any
//! schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// The authenticated company profile returned by `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub logo_url: String,
    pub discord_rpc: DiscordRpc,
    pub driver_count: DriverCount,
}

/// Discord rich-presence application ids, one per simulation title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscordRpc {
    pub eut2_app_id: String,
    pub ats_app_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverCount {
    pub current: u32,
    pub max: u32,
}

/// A driver registered to the company, addressed externally by `steam_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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

/// Install state of the driver's telemetry client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverClient {
    pub is_installed: bool,
    pub version: ClientVersion,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientVersion {
    pub version: String,
    pub branch: String,
    pub platform: String,
}

/// Per-title telemetry-sharing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverSettings {
    pub eut2: TitleSettings,
    pub ats: TitleSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleSettings {
    pub job_logging: bool,
    pub live_tracking: bool,
}

/// Partial update for a driver's settings, sent by
/// `DriverManager::manage`. Only the fields present in the JSON are
/// applied; omitted toggles remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManageDriverOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eut2_job_logging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eut2_live_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_job_logging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_live_tracking: Option<bool>,
}

//! Driver lifecycle operations against the `/drivers` resource family.
//!
//! # Design
//! `DriverManager` is a borrowed view over the owning `TrackSim` client;
//! `TrackSim::drivers()` hands out a fresh one per call and all requests go
//! through the client's transport. Every operation validates `steam_id`
//! before any network access, so a bad call site issues zero requests.

use serde::Serialize;

use crate::client::{decode, encode, TrackSim};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{Driver, ManageDriverOptions};

/// Wire body addressing a driver by Steam id, used by `add` and `remove`.
#[derive(Serialize)]
struct SteamIdBody<'a> {
    steam_id: &'a str,
}

/// Wire envelope for `manage`; the service expects the toggles wrapped
/// under an `options` key.
#[derive(Serialize)]
struct ManageBody<'a> {
    options: &'a ManageDriverOptions,
}

/// Manager for the company's drivers, obtained from `TrackSim::drivers()`.
pub struct DriverManager<'a> {
    client: &'a TrackSim,
}

impl<'a> DriverManager<'a> {
    pub(crate) fn new(client: &'a TrackSim) -> Self {
        Self { client }
    }

    /// Add a driver to your company.
    ///
    /// Issues `POST /drivers` and returns the created driver. Registering a
    /// steam id the service already knows is surfaced as whatever status
    /// the service answers with (`ApiError::Http`).
    pub fn add(&self, steam_id: &str) -> Result<Driver, ApiError> {
        require_steam_id(steam_id)?;
        let body = encode(&SteamIdBody { steam_id })?;
        let response = self
            .client
            .execute(HttpMethod::Post, "/drivers", Some(body))?;
        decode(response)
    }

    /// Remove a driver from your company.
    ///
    /// Issues `DELETE /drivers` and returns the raw HTTP status code —
    /// success and failure statuses alike come back as the code, never as
    /// `ApiError::Http`. Only transport-level failures produce `Err`.
    pub fn remove(&self, steam_id: &str) -> Result<u16, ApiError> {
        require_steam_id(steam_id)?;
        let body = encode(&SteamIdBody { steam_id })?;
        let response = self
            .client
            .execute(HttpMethod::Delete, "/drivers", Some(body))?;
        Ok(response.status)
    }

    /// Get details about a driver.
    pub fn details(&self, steam_id: &str) -> Result<Driver, ApiError> {
        require_steam_id(steam_id)?;
        let response = self.client.execute(
            HttpMethod::Get,
            &format!("/drivers/{steam_id}/details"),
            None,
        )?;
        decode(response)
    }

    /// Change a driver's telemetry settings.
    ///
    /// Issues `PATCH /drivers/{steam_id}/manage` with the partial toggles
    /// and returns the updated driver. Toggles left `None` are not sent
    /// and remain unchanged on the server.
    pub fn manage(
        &self,
        steam_id: &str,
        options: &ManageDriverOptions,
    ) -> Result<Driver, ApiError> {
        require_steam_id(steam_id)?;
        let body = encode(&ManageBody { options })?;
        let response = self.client.execute(
            HttpMethod::Patch,
            &format!("/drivers/{steam_id}/manage"),
            Some(body),
        )?;
        decode(response)
    }
}

fn require_steam_id(steam_id: &str) -> Result<(), ApiError> {
    if steam_id.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Steam ID should be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

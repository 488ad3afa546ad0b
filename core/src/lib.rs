//! Client SDK for the TrackSim company-management API.
//!
//! # Overview
//! Fetches the authenticated company's profile and adds, removes, inspects,
//! and configures drivers. Each operation validates its arguments, issues
//! exactly one HTTP request, and returns the decoded response body (or, for
//! `remove`, the raw HTTP status code).
//!
//! # Design
//! - `TrackSim` holds only the API key, the base URL, and a shared
//!   `Transport`; there is no mutable state between calls.
//! - `DriverManager` is a borrowed view obtained from `TrackSim::drivers()`.
//! - The `Transport` trait is the I/O boundary: `UreqTransport` executes
//!   requests in production, a capturing mock replaces it in unit tests,
//!   and integration tests run the real transport against the mock-server
//!   crate.
//! - Argument validation is fail-fast: a rejected call issues no request.

pub mod client;
pub mod drivers;
pub mod error;
pub mod http;
pub mod types;

pub use client::{TrackSim, DEFAULT_BASE_URL};
pub use drivers::DriverManager;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{
    ClientVersion, Company, DiscordRpc, Driver, DriverClient, DriverCount, DriverSettings,
    ManageDriverOptions, TitleSettings,
};

//! # Timecard Server
//!
//! An Axum-based reference implementation of the status oracle contract.
//!
//! Ties an authentication provider to an in-memory interval log and serves
//! the three endpoints the sync engine relies on:
//!
//! * **`POST /jobs/{id}/start`**: opens a new time interval for (job, caller).
//! * **`POST /jobs/{id}/stop`**: closes the caller's most recent open
//!   interval, or responds `400` if none is open.
//! * **`GET /jobs/{id}/status`**: the caller's most recent interval, or
//!   JSON `null` if none exists.
//!
//! Every route requires a bearer credential; an invalid or expired one is
//! rejected with `403`, the client's signal to re-authenticate.
//!
//! ## Example
//!
//! ```no_run
//! use timecard_server::prelude::*;
//!
//! # async fn run() {
//! let app = TimecardServer::default().build_with_jwt();
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

mod api;

pub mod auth;
pub mod jwt;
pub mod log;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use jwt::JwtService;
use log::IntervalLog;
use state::AppState;
use timecard_core::prelude::{routes::*, *};
use tower_http::trace::TraceLayer;

/// The builder for the oracle server.
#[derive(Clone, Debug, Default)]
pub struct TimecardServer {
    config: TimecardServerConfig,
}

impl TimecardServer {
    pub fn new(config: TimecardServerConfig) -> Self {
        Self { config }
    }
}

#[derive(Clone, Debug)]
pub struct TimecardServerConfig {
    /// The secret used for JWT bearer credentials.
    ///
    /// **NOTE:** This should be set to a secure value!
    pub jwt_secret: String,
}

impl Default for TimecardServerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "TOP_SECRET".to_string(),
        }
    }
}

impl TimecardServer {
    /// Builds the router with an injected authentication provider.
    pub fn build<A: AuthProvider>(self, auth: A) -> Router {
        Router::new()
            .route(HEALTH, get(|| async { "OK" }))
            .route(JOB_START, post(api::start_job))
            .route(JOB_STOP, post(api::stop_job))
            .route(JOB_STATUS, get(api::job_status))
            .layer(TraceLayer::new_for_http())
            .with_state(AppState {
                auth,
                log: IntervalLog::default(),
            })
    }

    /// Builds the router with JWT verification against the configured secret.
    pub fn build_with_jwt(self) -> Router {
        let jwt = JwtService::new(&self.config.jwt_secret);
        self.build(jwt)
    }
}

pub mod prelude {
    pub use crate::jwt::*;
    pub use crate::log::*;
    pub use crate::state::*;
    pub use crate::{TimecardServer, TimecardServerConfig};
}

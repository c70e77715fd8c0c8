use crate::auth::AuthenticatedUser;
use crate::log::LogError;
use crate::state::AppState;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use timecard_core::prelude::*;
use tracing::error;

pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<AuthError>() {
            return match err {
                AuthError::Missing => error_body(StatusCode::UNAUTHORIZED, err.to_string()),
                AuthError::Invalid | AuthError::Expired => {
                    error_body(StatusCode::FORBIDDEN, err.to_string())
                }
                AuthError::System(_) => {
                    error!("Internal Auth Provider Error: {:?}", self.0);
                    error_body(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Auth Error".to_string(),
                    )
                }
            };
        }

        if let Some(err) = self.0.downcast_ref::<LogError>() {
            return match err {
                LogError::NoOpenInterval => error_body(StatusCode::BAD_REQUEST, err.to_string()),
            };
        }

        error!("Internal Server Error: {:?}", self.0);
        error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    }
}

/// POST /jobs/{id}/start
pub async fn start_job<A: AuthProvider>(
    State(state): State<AppState<A>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.log.start(&id, &user.id);
    Ok(Json(record))
}

/// POST /jobs/{id}/stop
pub async fn stop_job<A: AuthProvider>(
    State(state): State<AppState<A>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.log.stop(&id, &user.id)?;
    Ok(Json(record))
}

/// GET /jobs/{id}/status
///
/// Responds with the caller's most recent interval, or a JSON `null` body
/// if the caller never tracked time on the job.
pub async fn job_status<A: AuthProvider>(
    State(state): State<AppState<A>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.log.status(&id, &user.id);
    Ok(Json(record))
}

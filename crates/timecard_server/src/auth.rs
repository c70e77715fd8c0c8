use crate::api::ApiError;
use crate::state::AppState;

use axum::{extract::FromRequestParts, http::request::Parts};
use timecard_core::prelude::*;

/// A wrapper struct indicating a request has been authenticated.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

impl<A> FromRequestParts<AppState<A>> for AuthenticatedUser
where
    A: AuthProvider,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<A>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|auth_header| {
                auth_header
                    .to_str()
                    .map(|header_str| {
                        header_str
                            .strip_prefix("Bearer ")
                            .unwrap_or(header_str)
                            .trim()
                    })
                    .ok()
            })
            .unwrap_or("");

        if token.is_empty() {
            return Err(ApiError::from(AuthError::Missing));
        }

        state
            .auth
            .verify(token)
            .await
            .map(AuthenticatedUser)
            .map_err(ApiError::from)
    }
}

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::{Span, warn};

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::users::User;
use crate::infrastructure::auth::hash_token;

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

fn unauthorized() -> ApiError {
    AppError::Unauthorized.into()
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            Span::current().record("user.id", tracing::field::display(&user.user.id));
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|err| {
            warn!(error = %err, "authorization header contains invalid characters");
            unauthorized()
        })?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(unauthorized)?;

        let token_record = state
            .token_repo
            .get_by_token_hash(&hash_token(token))
            .await
            .map_err(|err| {
                warn!(error = %err, "bearer token lookup failed");
                unauthorized()
            })?;

        if token_record.is_revoked() {
            return Err(unauthorized());
        }

        // Fire and forget.
        let token_repo = state.token_repo.clone();
        let token_id = token_record.id;
        tokio::spawn(async move {
            if let Err(err) = token_repo.update_last_used(token_id).await {
                warn!(error = %err, %token_id, "failed to update token last_used");
            }
        });

        let user = state
            .user_repo
            .get(token_record.user_id)
            .await
            .map_err(|err| {
                warn!(error = %err, user_id = %token_record.user_id, "user lookup failed for valid token");
                unauthorized()
            })?;

        Span::current().record("user.id", tracing::field::display(&user.id));
        let auth = AuthenticatedUser { user };
        parts.extensions.insert(auth.clone());
        Ok(auth)
    }
}

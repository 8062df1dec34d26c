use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use super::session::{SessionData, read_cookie};
use crate::{models::user::Role, state::AppState};

/// Why a guarded route refused the request
#[derive(Debug, PartialEq)]
pub enum AuthRejection {
    /// No valid session; go log in
    Unauthenticated,
    /// Logged in, but the route needs a role the user lacks
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => Redirect::to("/login").into_response(),
            AuthRejection::Forbidden => Redirect::to("/").into_response(),
        }
    }
}

/// Authenticated user for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: String,
    pub session: SessionData,
}

impl CurrentUser {
    pub fn username(&self) -> &str {
        &self.session.username
    }

    pub fn is_admin(&self) -> bool {
        self.session.role == Role::Admin
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie = read_cookie(&parts.headers).ok_or(AuthRejection::Unauthenticated)?;
        let token = state
            .keys
            .verify(&cookie)
            .ok_or(AuthRejection::Unauthenticated)?;
        let session = state
            .sessions
            .get(&token)
            .await
            .ok_or(AuthRejection::Unauthenticated)?;

        Ok(Self { token, session })
    }
}

/// Authenticated user holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!("User '{}' denied access to an admin route", user.username());
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(user))
    }
}

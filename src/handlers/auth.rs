use axum::{
    extract::{Form, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::{
    auth::CurrentUser,
    error::Result,
    models::forms::LoginForm,
    state::AppState,
    views,
};

/// Shown for any bad credential, whichever field was wrong
pub const LOGIN_ERROR: &str = "Nom d'utilisateur ou mot de passe incorrect";

pub async fn login_page() -> Result<Html<String>> {
    views::render("login.html", context! {})
}

/// Handler for username/password login
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Response> {
    match state.auth.login(&form.username, &form.password).await? {
        Some(cookie) => Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()),
        None => Ok(views::render("login.html", context! { error => LOGIN_ERROR })?.into_response()),
    }
}

pub async fn logout(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    let cookie = state.auth.logout(&user.token).await;
    tracing::info!("User '{}' logged out", user.username());
    ([(header::SET_COOKIE, cookie)], Redirect::to("/login"))
}

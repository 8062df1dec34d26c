use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    auth::{CurrentUser, Flash, FlashLevel},
    state::AppState,
};

pub mod auth;
pub mod balance;
pub mod export;
pub mod products;
pub mod purchases;
pub mod sales;
pub mod user;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/", get(sales::index))
        .route("/ajouter", get(sales::add_page).post(sales::add_sale))
        .route("/modifier/{id}", get(sales::edit_page).post(sales::edit_sale))
        .route("/supprimer/{id}", get(sales::delete_sale))
        .route(
            "/approvisionnement",
            get(purchases::purchases_page).post(purchases::add_purchase),
        )
        .route("/bilan", get(balance::balance_page))
        .route("/produits", get(products::products_page))
        .route("/produits/ajouter", post(products::add_product))
        .route("/produits/modifier/{id}", post(products::rename_product))
        .route("/produits/supprimer/{id}", get(products::delete_product))
        .route("/export_pdf", get(export::export_pdf))
        .route("/export/excel", get(export::export_excel))
        .route("/utilisateurs", get(user::users_page).post(user::create_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Queue a flash message for the user and redirect
async fn flash_redirect(
    state: &AppState,
    user: &CurrentUser,
    level: FlashLevel,
    message: impl Into<String>,
    to: &str,
) -> Redirect {
    state
        .sessions
        .push_flash(&user.token, Flash::new(level, message))
        .await;
    Redirect::to(to)
}

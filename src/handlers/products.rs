use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect},
};
use minijinja::context;

use super::flash_redirect;
use crate::{
    auth::{CurrentUser, FlashLevel},
    error::{AppError, Result},
    models::forms::ProductForm,
    state::AppState,
    views,
};

const PRODUCTS: &str = "/produits";

pub async fn products_page(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse> {
    let products = state.products.list().await?;
    views::render_page(&state, &user, "produits.html", context! { produits => products }).await
}

/// Add a catalog entry; blank names are ignored, taken names are reported
pub async fn add_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Redirect::to(PRODUCTS));
    }

    match state.products.add(name).await {
        Ok(id) => {
            tracing::info!("Product {} '{}' added by '{}'", id, name, user.username());
            Ok(Redirect::to(PRODUCTS))
        }
        Err(AppError::AlreadyExists(_)) => Ok(already_exists(&state, &user, name).await),
        Err(e) => Err(e),
    }
}

pub async fn rename_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Redirect::to(PRODUCTS));
    }

    match state.products.rename(id, name).await {
        Ok(()) => {
            tracing::info!("Product {} renamed to '{}'", id, name);
            Ok(Redirect::to(PRODUCTS))
        }
        Err(AppError::AlreadyExists(_)) => Ok(already_exists(&state, &user, name).await),
        Err(AppError::NotFound) => Ok(flash_redirect(
            &state,
            &user,
            FlashLevel::Error,
            "Produit introuvable.",
            PRODUCTS,
        )
        .await),
        Err(e) => Err(e),
    }
}

/// Remove a catalog entry; past sales and purchases keep the name
pub async fn delete_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.products.delete(id).await?;
    tracing::info!("Product {} deleted by '{}'", id, user.username());
    Ok(Redirect::to(PRODUCTS))
}

async fn already_exists(state: &AppState, user: &CurrentUser, name: &str) -> Redirect {
    flash_redirect(
        state,
        user,
        FlashLevel::Warning,
        format!("Le produit '{}' existe déjà.", name),
        PRODUCTS,
    )
    .await
}

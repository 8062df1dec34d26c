use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};
use chrono::Local;
use minijinja::context;

use crate::{
    auth::CurrentUser,
    error::Result,
    models::forms::PurchaseForm,
    state::AppState,
    views,
};

/// Restocking history plus the catalog for the entry form
pub async fn purchases_page(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse> {
    let products = state.products.names().await?;
    let purchases = state.purchases.list().await?;

    views::render_page(
        &state,
        &user,
        "approvisionnement.html",
        context! {
            produits => products,
            approv => purchases,
        },
    )
    .await
}

pub async fn add_purchase(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<PurchaseForm>,
) -> Result<Redirect> {
    let purchase = form.validate().inspect_err(|e| {
        tracing::warn!("Rejected purchase from '{}': {}", user.username(), e);
    })?;

    let id = state
        .purchases
        .create(&purchase, Local::now().naive_local())
        .await?;
    tracing::info!("Purchase {} recorded by '{}'", id, user.username());

    Ok(Redirect::to("/approvisionnement"))
}

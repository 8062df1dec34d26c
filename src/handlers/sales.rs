use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;
use minijinja::context;

use super::flash_redirect;
use crate::{
    auth::{CurrentUser, FlashLevel},
    error::{AppError, Result},
    models::forms::{EditSaleForm, SaleForm, SearchQuery},
    state::AppState,
    views,
};

const SALE_NOT_FOUND: &str = "Vente introuvable.";

/// Sale listing, optionally filtered on product or date
pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let listing = state.sales.search(&query.recherche).await?;

    views::render_page(
        &state,
        &user,
        "index.html",
        context! {
            ventes => listing.sales,
            total_general => listing.total,
            recherche => query.recherche,
        },
    )
    .await
}

pub async fn add_page(State(state): State<AppState>, user: CurrentUser) -> Result<impl IntoResponse> {
    let products = state.products.names().await?;
    views::render_page(&state, &user, "ajouter.html", context! { produits => products }).await
}

pub async fn add_sale(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<SaleForm>,
) -> Result<Redirect> {
    let sale = form.validate().inspect_err(|e| {
        tracing::warn!("Rejected sale from '{}': {}", user.username(), e);
    })?;

    let id = state.sales.create(&sale, Local::now().naive_local()).await?;
    tracing::info!(
        "Sale {} recorded by '{}': {} x {} = {}",
        id,
        user.username(),
        sale.quantity,
        sale.unit_price,
        sale.total()
    );

    Ok(Redirect::to("/"))
}

pub async fn edit_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response> {
    match state.sales.get(id).await {
        Ok(sale) => Ok(
            views::render_page(&state, &user, "modifier_vente.html", context! { vente => sale })
                .await?
                .into_response(),
        ),
        Err(AppError::NotFound) => {
            Ok(flash_redirect(&state, &user, FlashLevel::Error, SALE_NOT_FOUND, "/")
                .await
                .into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn edit_sale(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<EditSaleForm>,
) -> Result<Redirect> {
    match state.sales.get(id).await {
        Ok(_) => {}
        Err(AppError::NotFound) => {
            return Ok(flash_redirect(&state, &user, FlashLevel::Error, SALE_NOT_FOUND, "/").await);
        }
        Err(e) => return Err(e),
    }

    let update = form.validate()?;
    state.sales.update(id, &update).await?;
    tracing::info!("Sale {} updated by '{}'", id, user.username());

    Ok(flash_redirect(
        &state,
        &user,
        FlashLevel::Success,
        "Vente modifiée avec succès.",
        "/",
    )
    .await)
}

pub async fn delete_sale(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.sales.delete(id).await?;
    tracing::info!("Sale {} deleted by '{}'", id, user.username());

    Ok(flash_redirect(&state, &user, FlashLevel::Info, "Vente supprimée avec succès.", "/").await)
}

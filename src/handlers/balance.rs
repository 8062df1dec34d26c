use axum::{extract::State, response::IntoResponse};
use chrono::Local;
use minijinja::context;

use crate::{auth::CurrentUser, error::Result, state::AppState, views};

/// Day and month balance for the local calendar date
pub async fn balance_page(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse> {
    let balance = state.balances.balance(Local::now().date_naive()).await?;

    views::render_page(
        &state,
        &user,
        "bilan.html",
        context! {
            aujourd_hui => &balance.day,
            total_ventes_jour => balance.sales_day,
            total_achats_jour => balance.purchases_day,
            resultat_jour => balance.profit_day(),
            total_ventes_mois => balance.sales_month,
            total_achats_mois => balance.purchases_month,
            resultat_mois => balance.profit_month(),
        },
    )
    .await
}

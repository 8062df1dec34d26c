use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    auth::CurrentUser,
    error::Result,
    export::{PDF_FILENAME, XLSX_FILENAME, render_sales_pdf, render_sales_xlsx},
    state::AppState,
};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Sales report as a PDF download. Failures come back as plain text.
pub async fn export_pdf(State(state): State<AppState>, user: CurrentUser) -> Response {
    match build_pdf(&state).await {
        Ok(bytes) => {
            tracing::info!("PDF report exported by '{}'", user.username());
            attachment("application/pdf", PDF_FILENAME, bytes)
        }
        Err(e) => {
            tracing::error!("PDF export failed: {}", e);
            format!("Erreur lors de la génération du PDF : {}", e).into_response()
        }
    }
}

/// Sales as a workbook download, or a plain-text notice when there are none
pub async fn export_excel(State(state): State<AppState>, user: CurrentUser) -> Response {
    let sales = match state.sales.list().await {
        Ok(sales) => sales,
        Err(e) => {
            tracing::error!("Spreadsheet export failed: {}", e);
            return format!("Erreur lors de l'export Excel : {}", e).into_response();
        }
    };

    if sales.is_empty() {
        return "Aucune vente à exporter.".into_response();
    }

    match render_sales_xlsx(&sales) {
        Ok(bytes) => {
            tracing::info!("Spreadsheet exported by '{}'", user.username());
            attachment(XLSX_MIME, XLSX_FILENAME, bytes)
        }
        Err(e) => {
            tracing::error!("Spreadsheet export failed: {}", e);
            format!("Erreur lors de l'export Excel : {}", e).into_response()
        }
    }
}

async fn build_pdf(state: &AppState) -> Result<Vec<u8>> {
    let sales = state.sales.list().await?;
    Ok(render_sales_pdf(&sales)?)
}

fn attachment(mime: &str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

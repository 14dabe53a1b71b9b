// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    services::document_service::quotes_to_csv,
};

// GET /api/quotes/{quote_id}/pdf
#[utoipa::path(
    get,
    path = "/api/quotes/{quote_id}/pdf",
    tag = "Documents",
    responses(
        (status = 200, description = "PDF do orçamento", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Não encontrado")
    ),
    params(("quote_id" = Uuid, Path, description = "ID do orçamento")),
    security(("api_jwt" = []))
)]
pub async fn generate_quote_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(quote_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let quote = app_state.quote_service
        .get_quote(user.0.id, quote_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let pdf_bytes = app_state.document_service
        .generate_quote_pdf(&quote)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"orcamento_{}.pdf\"", quote_id)),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// GET /api/exports/quotes.csv
#[utoipa::path(
    get,
    path = "/api/exports/quotes.csv",
    tag = "Documents",
    responses(
        (status = 200, description = "Planilha com todos os orçamentos do usuário", body = String, content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_quotes_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<Response, ApiError> {
    let quotes = app_state.quote_service
        .list_quotes(user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (header::CONTENT_DISPOSITION, "attachment; filename=\"orcamentos.csv\""),
    ];

    Ok((headers, quotes_to_csv(&quotes)).into_response())
}

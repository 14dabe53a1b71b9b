// src/handlers/quotes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::quote::{CreateQuotePayload, Quote, UpdateAcceptancePayload, UpdateQuoteStatusPayload},
};

// POST /api/quotes
#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "Quotes",
    request_body = CreateQuotePayload,
    responses(
        (status = 201, description = "Orçamento criado como rascunho", body = Quote),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state.quote_service
        .create_quote(user.0.id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(quote)))
}

// GET /api/quotes
#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Quotes",
    responses(
        (status = 200, description = "Orçamentos do usuário, mais recentes primeiro", body = Vec<Quote>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state.quote_service
        .list_quotes(user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotes)))
}

// GET /api/quotes/{quote_id}
#[utoipa::path(
    get,
    path = "/api/quotes/{quote_id}",
    tag = "Quotes",
    responses(
        (status = 200, description = "Orçamento", body = Quote),
        (status = 404, description = "Não encontrado")
    ),
    params(("quote_id" = Uuid, Path, description = "ID do orçamento")),
    security(("api_jwt" = []))
)]
pub async fn get_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(quote_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state.quote_service
        .get_quote(user.0.id, quote_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

// DELETE /api/quotes/{quote_id}
#[utoipa::path(
    delete,
    path = "/api/quotes/{quote_id}",
    tag = "Quotes",
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Não encontrado")
    ),
    params(("quote_id" = Uuid, Path, description = "ID do orçamento")),
    security(("api_jwt" = []))
)]
pub async fn delete_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(quote_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.quote_service
        .delete_quote(user.0.id, quote_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/quotes/{quote_id}/status
#[utoipa::path(
    put,
    path = "/api/quotes/{quote_id}/status",
    tag = "Quotes",
    request_body = UpdateQuoteStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Quote),
        (status = 404, description = "Não encontrado"),
        (status = 422, description = "Status desconhecido")
    ),
    params(("quote_id" = Uuid, Path, description = "ID do orçamento")),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(quote_id): Path<Uuid>,
    Json(payload): Json<UpdateQuoteStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let quote = app_state.quote_service
        .change_status(user.0.id, quote_id, &payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

// PUT /api/quotes/{quote_id}/acceptance
#[utoipa::path(
    put,
    path = "/api/quotes/{quote_id}/acceptance",
    tag = "Quotes",
    request_body = UpdateAcceptancePayload,
    responses(
        (status = 200, description = "Aceite registrado ou desfeito", body = Quote),
        (status = 404, description = "Não encontrado")
    ),
    params(("quote_id" = Uuid, Path, description = "ID do orçamento")),
    security(("api_jwt" = []))
)]
pub async fn update_acceptance(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(quote_id): Path<Uuid>,
    Json(payload): Json<UpdateAcceptancePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state.quote_service
        .set_acceptance(user.0.id, quote_id, payload.accepted)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

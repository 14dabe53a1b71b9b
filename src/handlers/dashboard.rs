// src/handlers/dashboard.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::dashboard::{DashboardMetrics, PreviewMetricsPayload},
    services::dashboard_service::compute_metrics,
};

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais, mês atual x anterior e gráfico de 6 meses", body = DashboardMetrics),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let today = Utc::now().date_naive();

    let metrics = app_state.dashboard_service
        .get_metrics(user.0.id, today)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(metrics)))
}

// POST /api/dashboard/preview
// Mesma agregação, mas sobre orçamentos enviados no corpo (ex: exportados de outra conta)
#[utoipa::path(
    post,
    path = "/api/dashboard/preview",
    tag = "Dashboard",
    request_body = PreviewMetricsPayload,
    responses(
        (status = 200, description = "Métricas calculadas sobre a lista enviada", body = DashboardMetrics),
        (status = 400, description = "Corpo não é JSON válido"),
        (status = 422, description = "JSON com formato inesperado (ex: `quotes` não é uma lista)"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    payload: Result<Json<PreviewMetricsPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload
        .map_err(|rejection| AppError::from(rejection).to_api_error(&locale, &app_state.i18n_store))?;

    let today = payload.today.unwrap_or_else(|| Utc::now().date_naive());
    Ok((StatusCode::OK, Json(compute_metrics(&payload.quotes, today))))
}

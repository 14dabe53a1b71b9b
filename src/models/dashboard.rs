// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::quote::Quote;

// Um ponto do gráfico dos últimos 6 meses
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDataPoint {
    #[schema(example = "Mar")]
    pub month: String,
    #[schema(example = 12500)]
    pub revenue: i64,
    #[schema(example = 4)]
    pub quotes: usize,
}

// Os números do painel. Recalculados a cada chamada, nunca persistidos.
// Todos os valores de receita já vêm arredondados para inteiro.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_quotes: usize,
    pub quotes_accepted: usize,
    pub quotes_emailed: usize,
    pub quotes_exported: usize,
    pub quotes_pending: usize,

    pub total_filming_hours: Decimal,
    pub accepted_filming_hours: Decimal,

    pub total_potential_revenue: i64,
    pub actual_revenue: i64,

    pub days_scheduled: usize,
    pub accepted_days_scheduled: usize,

    // Mês atual x mês anterior
    pub current_month_revenue: i64,
    pub last_month_revenue: i64,
    pub revenue_growth_percent: i64,
    pub current_month_quotes: usize,
    pub last_month_quotes: usize,
    pub quotes_growth_percent: i64,

    pub monthly_data: Vec<MonthlyDataPoint>,
}

// Calcula métricas sobre uma lista enviada pelo cliente (sem tocar no banco)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMetricsPayload {
    #[serde(default)]
    pub quotes: Vec<Quote>,
    /// Data de referência; se ausente, usa a data de hoje (UTC).
    #[schema(example = "2025-01-15")]
    pub today: Option<NaiveDate>,
}

// src/services/dashboard_service.rs

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::QuoteRepository,
    models::{
        dashboard::{DashboardMetrics, MonthlyDataPoint},
        quote::Quote,
    },
};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Quantidade de meses do gráfico (o atual incluso)
const TRAILING_MONTHS: u32 = 6;

#[derive(Clone)]
pub struct DashboardService {
    repo: QuoteRepository,
}

impl DashboardService {
    pub fn new(repo: QuoteRepository) -> Self {
        Self { repo }
    }

    // Busca os orçamentos do usuário e agrega. `today` vem de quem chama.
    pub async fn get_metrics(&self, owner_id: Uuid, today: NaiveDate) -> Result<DashboardMetrics, AppError> {
        let quotes = self.repo.list_by_owner(owner_id).await?;
        tracing::info!("📊 Calculando métricas de {} orçamentos (ref. {})", quotes.len(), today);
        Ok(compute_metrics(&quotes, today))
    }
}

// Mês de calendário com índice 0..=11, igual ao usado no gráfico
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonthKey {
    year: i32,
    month0: u32,
}

impl MonthKey {
    fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month0: date.month0() }
    }

    /// Volta `n` meses, atravessando a virada de ano (Jan - 1 = Dez do ano anterior).
    fn months_back(self, n: u32) -> Self {
        let absolute = self.year * 12 + self.month0 as i32 - n as i32;
        Self {
            year: absolute.div_euclid(12),
            month0: absolute.rem_euclid(12) as u32,
        }
    }

    fn contains(self, ts: DateTime<Utc>) -> bool {
        ts.year() == self.year && ts.month0() == self.month0
    }

    fn label(self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }
}

/// Arredonda receita para inteiro (meio para longe do zero). Única regra usada no painel.
/// Fora da faixa de `i64` satura no limite do mesmo sinal.
fn round_revenue(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() { i64::MIN } else { i64::MAX })
}

// Soma que satura em Decimal::MAX/MIN em vez de estourar.
fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, saturating_add)
}

fn saturating_add(sum: Decimal, value: Decimal) -> Decimal {
    sum.checked_add(value)
        .unwrap_or(if value.is_sign_negative() { Decimal::MIN } else { Decimal::MAX })
}

/// Crescimento percentual entre dois períodos.
/// Base zero: 0 -> positivo vale 100%, 0 -> 0 vale 0%.
pub fn growth_percent(previous: Decimal, current: Decimal) -> i64 {
    if previous > Decimal::ZERO {
        let ratio = current
            .checked_sub(previous)
            .and_then(|diff| diff.checked_div(previous))
            .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED));
        match ratio {
            Some(ratio) => round_revenue(ratio),
            None if current < previous => i64::MIN,
            None => i64::MAX,
        }
    } else if current > Decimal::ZERO {
        100
    } else {
        0
    }
}

// (receita arredondada, quantidade) dos aceitos com data efetiva no mês
fn month_totals(accepted: &[&Quote], month: MonthKey) -> (i64, usize) {
    let (revenue, count) = accepted
        .iter()
        .filter(|q| q.effective_acceptance_date().is_some_and(|ts| month.contains(ts)))
        .fold((Decimal::ZERO, 0usize), |(sum, n), q| (saturating_add(sum, q.revenue_or_zero()), n + 1));
    (round_revenue(revenue), count)
}

/// Agrega a lista de orçamentos nos números do painel.
///
/// Função pura: não lê o relógio, não falha. Campos numéricos ausentes contam como 0
/// e orçamentos sem data efetiva ficam de fora apenas dos recortes mensais.
pub fn compute_metrics(quotes: &[Quote], today: NaiveDate) -> DashboardMetrics {
    let accepted: Vec<&Quote> = quotes.iter().filter(|q| q.is_accepted).collect();

    let quotes_emailed = quotes.iter().filter(|q| q.is_emailed()).count();
    let quotes_exported = quotes.iter().filter(|q| q.is_exported()).count();
    let quotes_pending = quotes.iter().filter(|q| q.is_pending()).count();

    let total_filming_hours = saturating_sum(quotes.iter().map(|q| q.filming_hours_or_zero()));
    let accepted_filming_hours = saturating_sum(accepted.iter().map(|q| q.filming_hours_or_zero()));

    let total_potential_revenue = saturating_sum(quotes.iter().map(|q| q.revenue_or_zero()));
    let actual_revenue = saturating_sum(accepted.iter().map(|q| q.revenue_or_zero()));

    let days_scheduled = quotes.iter().filter(|q| q.is_scheduled()).count();
    let accepted_days_scheduled = accepted.iter().filter(|q| q.is_scheduled()).count();

    let current_month = MonthKey::of(today);
    let last_month = current_month.months_back(1);

    let (current_month_revenue, current_month_quotes) = month_totals(&accepted, current_month);
    let (last_month_revenue, last_month_quotes) = month_totals(&accepted, last_month);

    let monthly_data = (0..TRAILING_MONTHS)
        .rev()
        .map(|i| {
            let month = current_month.months_back(i);
            let (revenue, quotes) = month_totals(&accepted, month);
            MonthlyDataPoint { month: month.label().to_string(), revenue, quotes }
        })
        .collect();

    DashboardMetrics {
        total_quotes: quotes.len(),
        quotes_accepted: accepted.len(),
        quotes_emailed,
        quotes_exported,
        quotes_pending,
        total_filming_hours,
        accepted_filming_hours,
        total_potential_revenue: round_revenue(total_potential_revenue),
        actual_revenue: round_revenue(actual_revenue),
        days_scheduled,
        accepted_days_scheduled,
        current_month_revenue,
        last_month_revenue,
        revenue_growth_percent: growth_percent(
            Decimal::from(last_month_revenue),
            Decimal::from(current_month_revenue),
        ),
        current_month_quotes,
        last_month_quotes,
        quotes_growth_percent: growth_percent(
            Decimal::from(last_month_quotes),
            Decimal::from(current_month_quotes),
        ),
        monthly_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn quote(revenue: i64, accepted: bool, status: &str) -> Quote {
        Quote {
            revenue: Some(Decimal::from(revenue)),
            is_accepted: accepted,
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn accepted_on(revenue: i64, when: DateTime<Utc>) -> Quote {
        Quote { accepted_at: Some(when), ..quote(revenue, true, "emailed") }
    }

    fn month_labels(m: &DashboardMetrics) -> Vec<&str> {
        m.monthly_data.iter().map(|p| p.month.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_zeros_and_six_named_months() {
        let m = compute_metrics(&[], date(2024, 3, 15));

        assert_eq!(m.total_quotes, 0);
        assert_eq!(m.quotes_accepted, 0);
        assert_eq!(m.quotes_pending, 0);
        assert_eq!(m.total_filming_hours, Decimal::ZERO);
        assert_eq!(m.total_potential_revenue, 0);
        assert_eq!(m.actual_revenue, 0);
        assert_eq!(m.revenue_growth_percent, 0);
        assert_eq!(m.quotes_growth_percent, 0);
        assert_eq!(month_labels(&m), vec!["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
        assert!(m.monthly_data.iter().all(|p| p.revenue == 0 && p.quotes == 0));
    }

    #[test]
    fn end_to_end_three_quotes() {
        let today = date(2024, 6, 20);
        let quotes = vec![
            accepted_on(1000, at(2024, 6, 3)),
            accepted_on(2000, at(2024, 5, 18)),
            quote(500, false, "draft"),
        ];

        let m = compute_metrics(&quotes, today);

        assert_eq!(m.total_quotes, 3);
        assert_eq!(m.quotes_accepted, 2);
        assert_eq!(m.total_potential_revenue, 3500);
        assert_eq!(m.actual_revenue, 3000);
        assert_eq!(m.current_month_revenue, 1000);
        assert_eq!(m.last_month_revenue, 2000);
        assert_eq!(m.revenue_growth_percent, -50);
        assert_eq!(m.current_month_quotes, 1);
        assert_eq!(m.last_month_quotes, 1);
        assert_eq!(m.quotes_growth_percent, 0);

        let last_two: Vec<_> = m.monthly_data[4..].iter().map(|p| (p.month.as_str(), p.revenue, p.quotes)).collect();
        assert_eq!(last_two, vec![("May", 2000, 1), ("Jun", 1000, 1)]);
    }

    #[test]
    fn partitions_are_independent_of_acceptance() {
        let quotes = vec![
            quote(100, false, "emailed"),
            quote(100, true, "emailed"),
            quote(100, false, "exported"),
            quote(100, true, "downloaded"),
            quote(100, true, "done"),
            quote(100, false, "draft"),
            quote(100, false, "something-new"),
        ];

        let m = compute_metrics(&quotes, date(2024, 1, 1));

        assert_eq!(m.total_quotes, 7);
        assert_eq!(m.quotes_accepted, 3);
        assert_eq!(m.quotes_emailed, 2);
        assert_eq!(m.quotes_exported, 2);
        assert_eq!(m.quotes_pending, 1);
        assert!(m.quotes_pending <= m.quotes_emailed);
        assert!(m.actual_revenue <= m.total_potential_revenue);
    }

    #[test]
    fn growth_policy() {
        let d = |v: i64| Decimal::from(v);
        assert_eq!(growth_percent(d(0), d(0)), 0);
        assert_eq!(growth_percent(d(0), d(500)), 100);
        assert_eq!(growth_percent(d(200), d(300)), 50);
        assert_eq!(growth_percent(d(300), d(200)), -33);
        assert_eq!(growth_percent(d(100), d(0)), -100);
    }

    #[test]
    fn january_rolls_back_to_december_of_previous_year() {
        let today = date(2025, 1, 15);
        let quotes = vec![accepted_on(800, Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap())];

        let m = compute_metrics(&quotes, today);

        assert_eq!(m.last_month_revenue, 800);
        assert_eq!(m.last_month_quotes, 1);
        assert_eq!(m.current_month_revenue, 0);
        assert_eq!(m.revenue_growth_percent, -100);
        assert_eq!(month_labels(&m), vec!["Aug", "Sep", "Oct", "Nov", "Dec", "Jan"]);
        assert_eq!(m.monthly_data[4].revenue, 800);
    }

    #[test]
    fn same_month_of_another_year_is_not_counted() {
        let quotes = vec![accepted_on(400, at(2023, 3, 5))];
        let m = compute_metrics(&quotes, date(2024, 3, 20));

        assert_eq!(m.current_month_quotes, 0);
        assert!(m.monthly_data.iter().all(|p| p.quotes == 0));
        assert_eq!(m.actual_revenue, 400);
    }

    #[test]
    fn updated_at_is_the_fallback_acceptance_date() {
        let q: Quote = serde_json::from_value(json!({
            "revenue": 750,
            "is_accepted": true,
            "accepted_at": null,
            "updated_at": "2024-03-10"
        }))
        .unwrap();

        let m = compute_metrics(&[q], date(2024, 3, 20));

        assert_eq!(m.current_month_revenue, 750);
        assert_eq!(m.current_month_quotes, 1);
        assert_eq!(m.revenue_growth_percent, 100);
    }

    #[test]
    fn accepted_at_wins_over_updated_at() {
        let q = Quote {
            updated_at: Some(at(2024, 3, 2)),
            ..accepted_on(300, at(2024, 2, 27))
        };

        let m = compute_metrics(&[q], date(2024, 3, 10));

        assert_eq!(m.current_month_quotes, 0);
        assert_eq!(m.last_month_quotes, 1);
    }

    #[test]
    fn quotes_without_dates_only_leave_the_monthly_views() {
        let mut q = quote(1200, true, "emailed");
        q.filming_hours = Some(Decimal::from(4));

        let m = compute_metrics(&[q], date(2024, 3, 10));

        assert_eq!(m.quotes_accepted, 1);
        assert_eq!(m.actual_revenue, 1200);
        assert_eq!(m.accepted_filming_hours, Decimal::from(4));
        assert_eq!(m.current_month_revenue, 0);
        assert!(m.monthly_data.iter().all(|p| p.quotes == 0));
    }

    #[test]
    fn missing_numbers_count_as_zero() {
        let quotes = vec![
            Quote { is_accepted: true, ..Default::default() },
            Quote { filming_hours: Some(Decimal::new(25, 1)), ..Default::default() },
        ];

        let m = compute_metrics(&quotes, date(2024, 3, 10));

        assert_eq!(m.total_potential_revenue, 0);
        assert_eq!(m.actual_revenue, 0);
        assert_eq!(m.total_filming_hours, Decimal::new(25, 1));
        assert_eq!(m.accepted_filming_hours, Decimal::ZERO);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let row = json!({
            "revenue": "70000000000000000000000000000",
            "filmingHours": "70000000000000000000000000000",
            "isAccepted": true,
            "acceptedAt": "2024-03-05"
        });
        let quotes: Vec<Quote> = serde_json::from_value(json!([row.clone(), row])).unwrap();

        let m = compute_metrics(&quotes, date(2024, 3, 10));

        assert_eq!(m.total_potential_revenue, i64::MAX);
        assert_eq!(m.actual_revenue, i64::MAX);
        assert_eq!(m.current_month_revenue, i64::MAX);
        assert_eq!(m.current_month_quotes, 2);
        assert_eq!(m.total_filming_hours, Decimal::MAX);
        assert_eq!(m.accepted_filming_hours, Decimal::MAX);
        assert_eq!(m.revenue_growth_percent, 100);
        assert_eq!(m.monthly_data[5].revenue, i64::MAX);
    }

    #[test]
    fn revenue_above_i64_range_is_clamped_not_zeroed() {
        let mut q = accepted_on(0, at(2024, 3, 5));
        q.revenue = Decimal::from_str("10000000000000000000").ok();
        let mut earlier = accepted_on(0, at(2024, 2, 5));
        earlier.revenue = Decimal::from_str("10000000000000000000").ok();

        let m = compute_metrics(&[q, earlier], date(2024, 3, 10));

        assert_eq!(m.actual_revenue, i64::MAX);
        assert_eq!(m.current_month_revenue, i64::MAX);
        assert_eq!(m.last_month_revenue, i64::MAX);
        assert_eq!(m.revenue_growth_percent, 0);
    }

    #[test]
    fn growth_saturates_on_extreme_inputs() {
        assert_eq!(growth_percent(Decimal::ONE, Decimal::MAX), i64::MAX);
        assert_eq!(growth_percent(Decimal::MAX, Decimal::ZERO), -100);
        assert_eq!(growth_percent(Decimal::MAX, Decimal::MAX), 0);
    }

    #[test]
    fn scheduled_days_count_start_dates() {
        let mut a = quote(100, true, "done");
        a.project_start_date = Some(date(2024, 4, 1));
        let mut b = quote(100, false, "draft");
        b.project_start_date = Some(date(2024, 4, 8));
        let c = quote(100, true, "done");

        let m = compute_metrics(&[a, b, c], date(2024, 3, 10));

        assert_eq!(m.days_scheduled, 2);
        assert_eq!(m.accepted_days_scheduled, 1);
    }

    #[test]
    fn revenue_rounds_half_away_from_zero_everywhere() {
        let revenue = |s: &str| Some(Decimal::from_str(s).unwrap());
        let quotes = vec![
            Quote { revenue: revenue("100.25"), ..accepted_on(0, at(2024, 3, 1)) },
            Quote { revenue: revenue("100.25"), ..accepted_on(0, at(2024, 3, 2)) },
            Quote { revenue: revenue("0.4"), ..quote(0, false, "draft") },
        ];

        let m = compute_metrics(&quotes, date(2024, 3, 31));

        // 200.5 -> 201, 200.9 -> 201
        assert_eq!(m.actual_revenue, 201);
        assert_eq!(m.current_month_revenue, 201);
        assert_eq!(m.monthly_data[5].revenue, 201);
        assert_eq!(m.total_potential_revenue, 201);
    }

    #[test]
    fn last_entry_is_always_the_reference_month() {
        for (y, mth) in [(2024, 1), (2024, 6), (2024, 12), (2025, 5)] {
            let m = compute_metrics(&[], date(y, mth, 1));
            assert_eq!(m.monthly_data.len(), 6);
            assert_eq!(m.monthly_data[5].month, MONTH_NAMES[(mth - 1) as usize]);
        }
    }

    #[test]
    fn months_back_crosses_years() {
        let jan = MonthKey::of(date(2025, 1, 15));
        assert_eq!(jan.months_back(1), MonthKey { year: 2024, month0: 11 });
        assert_eq!(jan.months_back(13), MonthKey { year: 2023, month0: 11 });
        assert_eq!(jan.months_back(0), jan);
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let m = compute_metrics(&[accepted_on(1000, at(2024, 3, 1))], date(2024, 3, 5));
        let v = serde_json::to_value(&m).unwrap();

        assert_eq!(v["totalQuotes"], 1);
        assert_eq!(v["actualRevenue"], 1000);
        assert_eq!(v["revenueGrowthPercent"], 100);
        assert_eq!(v["monthlyData"].as_array().unwrap().len(), 6);
        assert_eq!(v["monthlyData"][5]["month"], "Mar");
    }
}

// src/models/quote.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::lenient;

// --- Status ---
// O status é uma tag livre. Produtores diferentes gravam 'exported' ou 'downloaded'
// para o mesmo estado, e alguns usam 'done'. Aceite é SEMPRE o `is_accepted`.
pub mod status {
    pub const DRAFT: &str = "draft";
    pub const EMAILED: &str = "emailed";
    pub const EXPORTED: &str = "exported";
    pub const DOWNLOADED: &str = "downloaded";
    pub const DONE: &str = "done";

    pub const KNOWN: [&str; 5] = [DRAFT, EMAILED, EXPORTED, DOWNLOADED, DONE];

    /// Normaliza ("  Emailed " -> "emailed") e devolve a tag se for conhecida.
    pub fn parse_known(raw: &str) -> Option<&'static str> {
        let normalized = raw.trim().to_ascii_lowercase();
        KNOWN.into_iter().find(|s| *s == normalized)
    }
}

// --- Registro do banco ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Quote {
    #[serde(deserialize_with = "lenient::uuid")]
    pub id: Uuid,
    #[schema(ignore)]
    #[serde(skip_serializing, deserialize_with = "lenient::uuid")]
    pub owner_id: Uuid,

    #[schema(example = "Produtora Aurora")]
    #[serde(alias = "client_name", deserialize_with = "lenient::text")]
    pub client_name: String,
    #[serde(alias = "client_email", deserialize_with = "lenient::optional_text")]
    pub client_email: Option<String>,
    #[schema(example = "Vídeo institucional 2025")]
    #[serde(alias = "project_title", deserialize_with = "lenient::text")]
    pub project_title: String,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub notes: Option<String>,

    #[schema(example = "4500.00")]
    #[serde(deserialize_with = "lenient::decimal")]
    pub revenue: Option<Decimal>,

    #[schema(example = "8")]
    #[serde(alias = "filming_hours", deserialize_with = "lenient::decimal")]
    pub filming_hours: Option<Decimal>,

    #[schema(example = "emailed")]
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,

    #[serde(alias = "is_accepted", deserialize_with = "lenient::flag")]
    pub is_accepted: bool,

    #[serde(alias = "project_start_date", deserialize_with = "lenient::date")]
    pub project_start_date: Option<NaiveDate>,

    #[serde(alias = "accepted_at", deserialize_with = "lenient::datetime")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(alias = "created_at", deserialize_with = "lenient::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updated_at", deserialize_with = "lenient::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn revenue_or_zero(&self) -> Decimal {
        self.revenue.unwrap_or(Decimal::ZERO)
    }

    pub fn filming_hours_or_zero(&self) -> Decimal {
        self.filming_hours.unwrap_or(Decimal::ZERO)
    }

    pub fn is_emailed(&self) -> bool {
        self.status == status::EMAILED
    }

    pub fn is_exported(&self) -> bool {
        self.status == status::EXPORTED || self.status == status::DOWNLOADED
    }

    /// Enviado por e-mail e ainda sem resposta do cliente.
    pub fn is_pending(&self) -> bool {
        self.is_emailed() && !self.is_accepted
    }

    pub fn is_scheduled(&self) -> bool {
        self.project_start_date.is_some()
    }

    /// Data usada para colocar um orçamento aceito num mês: `accepted_at`, senão `updated_at`.
    pub fn effective_acceptance_date(&self) -> Option<DateTime<Utc>> {
        self.accepted_at.or(self.updated_at)
    }
}

// --- Payloads ---

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative").with_message("validation.non_negative".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotePayload {
    #[validate(length(min = 1, message = "validation.required"))]
    #[schema(example = "Produtora Aurora")]
    pub client_name: String,

    #[validate(email(message = "validation.email"))]
    #[schema(example = "contato@aurora.com")]
    pub client_email: Option<String>,

    #[validate(length(min = 1, message = "validation.required"))]
    #[schema(example = "Vídeo institucional 2025")]
    pub project_title: String,

    #[schema(example = "São Paulo - SP")]
    pub location: Option<String>,
    pub notes: Option<String>,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "4500.00")]
    pub revenue: Option<Decimal>,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "8")]
    pub filming_hours: Option<Decimal>,

    pub project_start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteStatusPayload {
    #[validate(length(min = 1, message = "validation.required"))]
    #[schema(example = "emailed")]
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcceptancePayload {
    #[schema(example = true)]
    pub accepted: bool,
}

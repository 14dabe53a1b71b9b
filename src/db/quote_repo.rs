// src/db/quote_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::quote::{status, CreateQuotePayload, Quote},
};

const QUOTE_COLUMNS: &str = r#"
    id, owner_id, client_name, client_email, project_title, location, notes,
    revenue, filming_hours, status, is_accepted, project_start_date,
    accepted_at, created_at, updated_at
"#;

// Fonte dos orçamentos. Toda consulta é filtrada pelo dono (owner_id).
#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(quotes)
    }

    pub async fn find_by_id(&self, owner_id: Uuid, quote_id: Uuid) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes WHERE owner_id = $1 AND id = $2"
        ))
            .bind(owner_id)
            .bind(quote_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    pub async fn create(&self, owner_id: Uuid, input: &CreateQuotePayload) -> Result<Quote, AppError> {
        let quote = sqlx::query_as::<_, Quote>(&format!(
            r#"
            INSERT INTO quotes (
                owner_id, client_name, client_email, project_title, location, notes,
                revenue, filming_hours, project_start_date, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
            .bind(owner_id)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.project_title)
            .bind(&input.location)
            .bind(&input.notes)
            .bind(input.revenue)
            .bind(input.filming_hours)
            .bind(input.project_start_date)
            .bind(status::DRAFT)
            .fetch_one(&self.pool)
            .await?;
        Ok(quote)
    }

    pub async fn update_status(
        &self,
        owner_id: Uuid,
        quote_id: Uuid,
        new_status: &str,
    ) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(&format!(
            r#"
            UPDATE quotes
            SET status = $3, updated_at = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
            .bind(owner_id)
            .bind(quote_id)
            .bind(new_status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    // Aceitar preserva o accepted_at original; desfazer o aceite limpa a data
    pub async fn set_accepted(
        &self,
        owner_id: Uuid,
        quote_id: Uuid,
        accepted: bool,
    ) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(&format!(
            r#"
            UPDATE quotes
            SET is_accepted = $3,
                accepted_at = CASE WHEN $3 THEN COALESCE(accepted_at, NOW()) ELSE NULL END,
                updated_at = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
            .bind(owner_id)
            .bind(quote_id)
            .bind(accepted)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    pub async fn delete(&self, owner_id: Uuid, quote_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quotes WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(quote_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

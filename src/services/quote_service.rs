// src/services/quote_service.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::QuoteRepository,
    models::quote::{status, CreateQuotePayload, Quote},
};

#[derive(Clone)]
pub struct QuoteService {
    repo: QuoteRepository,
}

impl QuoteService {
    pub fn new(repo: QuoteRepository) -> Self {
        Self { repo }
    }

    pub async fn create_quote(&self, owner_id: Uuid, payload: &CreateQuotePayload) -> Result<Quote, AppError> {
        payload.validate()?;

        let quote = self.repo.create(owner_id, payload).await?;
        tracing::info!("📝 Orçamento {} criado para '{}'", quote.id, quote.client_name);
        Ok(quote)
    }

    pub async fn list_quotes(&self, owner_id: Uuid) -> Result<Vec<Quote>, AppError> {
        self.repo.list_by_owner(owner_id).await
    }

    pub async fn get_quote(&self, owner_id: Uuid, quote_id: Uuid) -> Result<Quote, AppError> {
        self.repo
            .find_by_id(owner_id, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)
    }

    // Só grava tags conhecidas, já normalizadas
    pub async fn change_status(&self, owner_id: Uuid, quote_id: Uuid, raw_status: &str) -> Result<Quote, AppError> {
        let new_status = status::parse_known(raw_status)
            .ok_or_else(|| AppError::InvalidStatus(raw_status.trim().to_string()))?;

        let quote = self.repo
            .update_status(owner_id, quote_id, new_status)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        tracing::info!("🔄 Orçamento {} agora está '{}'", quote.id, new_status);
        Ok(quote)
    }

    pub async fn set_acceptance(&self, owner_id: Uuid, quote_id: Uuid, accepted: bool) -> Result<Quote, AppError> {
        let quote = self.repo
            .set_accepted(owner_id, quote_id, accepted)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        if accepted {
            tracing::info!("✅ Orçamento {} aceito pelo cliente", quote.id);
        } else {
            tracing::info!("↩️ Aceite do orçamento {} desfeito", quote.id);
        }
        Ok(quote)
    }

    pub async fn delete_quote(&self, owner_id: Uuid, quote_id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(owner_id, quote_id).await? {
            return Err(AppError::QuoteNotFound);
        }
        tracing::info!("🗑️ Orçamento {} removido", quote_id);
        Ok(())
    }
}

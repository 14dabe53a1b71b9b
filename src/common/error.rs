// src/common/error.rs

use std::collections::HashMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros de domínio. Os handlers convertem para ApiError já traduzido.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Orçamento não encontrado")]
    QuoteNotFound,

    #[error("Status desconhecido: {0}")]
    InvalidStatus(String),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Falha ao gerar PDF: {0}")]
    PdfError(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Status HTTP + chave de tradução
    fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "error.validation"),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "error.email_exists"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "error.invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "error.invalid_token"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "error.user_not_found"),
            AppError::QuoteNotFound => (StatusCode::NOT_FOUND, "error.quote_not_found"),
            AppError::InvalidStatus(_) => (StatusCode::UNPROCESSABLE_ENTITY, "error.invalid_status"),
            AppError::InvalidBody(rejection) => (rejection.status(), "error.invalid_body"),
            AppError::PdfError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error.pdf"),
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error.internal"),
        }
    }

    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let (status, key) = self.status_and_key();

        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(msg_key) => store.translate(&locale.0, msg_key),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::InvalidStatus(status) => Some(json!({ "status": status })),
            AppError::InvalidBody(rejection) => Some(json!({ "reason": rejection.body_text() })),
            _ => None,
        };

        ApiError {
            status,
            error: store.translate(&locale.0, key),
            details,
        }
    }
}

// O erro que efetivamente sai na resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn not_found_is_translated() {
        let store = I18nStore::new();
        let api = AppError::QuoteNotFound.to_api_error(&pt(), &store);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Orçamento não encontrado.");
        assert!(api.details.is_none());
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let store = I18nStore::new();
        let err = AppError::InternalServerError(anyhow::anyhow!("conexão recusada em 10.0.0.3"));
        let api = err.to_api_error(&Locale("en".to_string()), &store);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "An unexpected error occurred.");
    }

    #[test]
    fn validation_details_list_each_field() {
        let store = I18nStore::new();
        let payload = crate::models::auth::RegisterUserPayload {
            email: "sem-arroba".to_string(),
            password: "123".to_string(),
        };
        let errors = payload.validate().unwrap_err();

        let api = AppError::ValidationError(errors).to_api_error(&pt(), &store);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);

        let details = api.details.unwrap();
        assert_eq!(details["email"][0], "O e-mail fornecido é inválido.");
        assert_eq!(details["password"][0], "A senha deve ter no mínimo 6 caracteres.");
    }

    #[test]
    fn invalid_status_echoes_the_tag() {
        let store = I18nStore::new();
        let api = AppError::InvalidStatus("archived".into()).to_api_error(&pt(), &store);
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.details.unwrap()["status"], "archived");
    }

    #[tokio::test]
    async fn json_rejections_become_translated_errors() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{\"quotes\": 12"))
            .unwrap();
        let rejection = Json::<Value>::from_request(request, &()).await.unwrap_err();

        let api = AppError::from(rejection).to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.error, "O corpo da requisição não é um JSON válido.");
        assert!(api.details.unwrap()["reason"].is_string());
    }
}

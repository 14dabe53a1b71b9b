// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Quotes ---
        handlers::quotes::create_quote,
        handlers::quotes::list_quotes,
        handlers::quotes::get_quote,
        handlers::quotes::delete_quote,
        handlers::quotes::update_status,
        handlers::quotes::update_acceptance,

        // --- Documents ---
        handlers::documents::generate_quote_pdf,
        handlers::documents::export_quotes_csv,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,
        handlers::dashboard::preview_metrics,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Quotes ---
            models::quote::Quote,
            models::quote::CreateQuotePayload,
            models::quote::UpdateQuoteStatusPayload,
            models::quote::UpdateAcceptancePayload,

            // --- Dashboard ---
            models::dashboard::DashboardMetrics,
            models::dashboard::MonthlyDataPoint,
            models::dashboard::PreviewMetricsPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Quotes", description = "Orçamentos de produção de vídeo"),
        (name = "Documents", description = "Exportação em PDF e CSV"),
        (name = "Dashboard", description = "Indicadores de orçamentos e receita")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/auth/register",
            "/api/users/me",
            "/api/quotes",
            "/api/quotes/{quote_id}",
            "/api/quotes/{quote_id}/status",
            "/api/quotes/{quote_id}/acceptance",
            "/api/quotes/{quote_id}/pdf",
            "/api/exports/quotes.csv",
            "/api/dashboard/metrics",
            "/api/dashboard/preview",
        ] {
            assert!(paths.contains(&expected), "rota ausente na documentação: {expected}");
        }
    }

    #[test]
    fn declares_bearer_security() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}

// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{QuoteRepository, UserRepository},
    services::{
        auth::AuthService, dashboard_service::DashboardService,
        document_service::DocumentService, quote_service::QuoteService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FONTS_DIR: &str = "./fonts";

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub bind_addr: String,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub quote_service: QuoteService,
    pub dashboard_service: DashboardService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| DEFAULT_FONTS_DIR.to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let quote_repo = QuoteRepository::new(db_pool.clone());

        Ok(Self {
            auth_service: AuthService::new(user_repo, jwt_secret),
            quote_service: QuoteService::new(quote_repo.clone()),
            dashboard_service: DashboardService::new(quote_repo),
            document_service: DocumentService::new(fonts_dir),
            i18n_store: I18nStore::new(),
            bind_addr,
            db_pool,
        })
    }
}

//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().await?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Tudo abaixo exige Bearer válido
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me));

    let quote_routes = Router::new()
        .route("/"
               ,post(handlers::quotes::create_quote)
               .get(handlers::quotes::list_quotes)
        )
        .route("/{quote_id}"
               ,get(handlers::quotes::get_quote)
               .delete(handlers::quotes::delete_quote)
        )
        .route("/{quote_id}/status", put(handlers::quotes::update_status))
        .route("/{quote_id}/acceptance", put(handlers::quotes::update_acceptance))
        .route("/{quote_id}/pdf", get(handlers::documents::generate_quote_pdf));

    let export_routes = Router::new()
        .route("/quotes.csv", get(handlers::documents::export_quotes_csv));

    let dashboard_routes = Router::new()
        .route("/metrics", get(handlers::dashboard::get_metrics))
        .route("/preview", post(handlers::dashboard::preview_metrics));

    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/quotes", quote_routes)
        .nest("/api/exports", export_routes)
        .nest("/api/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let bind_addr = app_state.bind_addr.clone();

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::session::session_middleware;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas da vitrine (resolução de tenant embutida nos handlers)
    let public_routes = Router::new()
        .route("/menu", get(handlers::menu::get_menu))
        .route("/payment-methods", get(handlers::checkout::get_payment_methods))
        .route("/orders/{id}", get(handlers::checkout::get_order))
        .route("/reservations", post(handlers::reservation::submit_reservation))
        .route("/reservations/slots", get(handlers::reservation::get_time_slots));

    // Rotas que dependem da sessão anônima do visitante
    let session_routes = Router::new()
        .route("/cart"
               ,get(handlers::cart::get_cart)
               .delete(handlers::cart::clear_cart)
        )
        .route("/cart/items"
               ,post(handlers::cart::add_item)
        )
        .route("/cart/items/{line_id}"
               ,patch(handlers::cart::update_item)
               .delete(handlers::cart::remove_item)
        )
        .route("/checkout"
               ,post(handlers::checkout::submit_checkout)
        )
        .layer(axum_middleware::from_fn(session_middleware));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", public_routes)
        .nest("/api", session_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::db::{
    BusinessRepository, CartRepository, CatalogRepository, OrderRepository,
    PgBusinessRepository, PgCartRepository, PgCatalogRepository, PgOrderRepository,
    PgReservationRepository, ReservationRepository,
};
use crate::services::{
    cart::CartService,
    catalog::CatalogService,
    checkout::CheckoutService,
    notifier::{StaffNotifier, WhatsAppNotifier},
    reservation::ReservationService,
    tenant_resolver::TenantResolver,
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub tenant_resolver: TenantResolver,
    pub catalog_service: CatalogService,
    pub cart_service: CartService,
    pub checkout_service: CheckoutService,
    pub reservation_service: ReservationService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let whatsapp_api_url =
            env::var("WHATSAPP_API_URL").expect("WHATSAPP_API_URL deve ser definida");
        let whatsapp_api_token =
            env::var("WHATSAPP_API_TOKEN").expect("WHATSAPP_API_TOKEN deve ser definido");
        // Número de fallback para estabelecimento sem WhatsApp próprio.
        let fallback_staff_phone = env::var("STAFF_WHATSAPP_FALLBACK").ok();

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        // Repositórios por trás de traits: os serviços enxergam só o
        // contrato, e os testes trocam por fakes em memória.
        let businesses: Arc<dyn BusinessRepository> =
            Arc::new(PgBusinessRepository::new(db_pool.clone()));
        let catalog: Arc<dyn CatalogRepository> =
            Arc::new(PgCatalogRepository::new(db_pool.clone()));
        let carts: Arc<dyn CartRepository> = Arc::new(PgCartRepository::new(db_pool.clone()));
        let orders: Arc<dyn OrderRepository> = Arc::new(PgOrderRepository::new(db_pool.clone()));
        let reservations: Arc<dyn ReservationRepository> =
            Arc::new(PgReservationRepository::new(db_pool.clone()));

        let notifier: Arc<dyn StaffNotifier> =
            Arc::new(WhatsAppNotifier::new(whatsapp_api_url, whatsapp_api_token)?);

        let tenant_resolver = TenantResolver::new(businesses);
        let catalog_service = CatalogService::new(catalog.clone());
        let cart_service = CartService::new(carts, catalog);
        let checkout_service = CheckoutService::new(
            cart_service.clone(),
            orders,
            notifier.clone(),
            fallback_staff_phone.clone(),
        );
        let reservation_service =
            ReservationService::new(reservations, notifier, fallback_staff_phone);

        Ok(Self {
            db_pool,
            jwt_secret,
            tenant_resolver,
            catalog_service,
            cart_service,
            checkout_service,
            reservation_service,
        })
    }
}

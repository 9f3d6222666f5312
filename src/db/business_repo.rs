// src/db/business_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::business::Business};

// ---
// Contrato de leitura do estabelecimento
// ---
// O resolvedor de tenant só precisa destes três pontos de consulta; o
// trait existe para a lógica rodar contra um fake em memória nos testes.
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError>;
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Business>, AppError>;
    /// O primeiro estabelecimento cadastrado (implantação single-tenant).
    async fn find_first(&self) -> Result<Option<Business>, AppError>;
}

#[derive(Clone)]
pub struct PgBusinessRepository {
    pool: PgPool,
}

impl PgBusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError> {
        let business = sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(business)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Business>, AppError> {
        let business = sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses WHERE owner_id = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(business)
    }

    async fn find_first(&self) -> Result<Option<Business>, AppError> {
        let business = sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses ORDER BY created_at ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(business)
    }
}

// src/db/catalog_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, Product},
};

// ---
// Contrato de leitura do catálogo
// ---
// Sempre filtrado pelo estabelecimento resolvido; a vitrine nunca enxerga
// itens inativos nem de outro tenant.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_active_categories(&self, business_id: Uuid) -> Result<Vec<Category>, AppError>;
    async fn list_active_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError>;
    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError>;
    /// Carrega de uma vez os produtos das linhas do carrinho.
    async fn find_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, AppError>;
}

#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_active_categories(&self, business_id: Uuid) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE business_id = $1 AND is_active = TRUE
            ORDER BY sort_order ASC, name ASC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn list_active_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE business_id = $1 AND is_active = TRUE
            ORDER BY name ASC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn find_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}

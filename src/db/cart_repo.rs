// src/db/cart_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::cart::CartLine};

// Teto de linhas carregadas de uma vez. Uma sessão normal tem meia dúzia
// de itens; o limite só protege contra uma sessão fugida do controle.
pub const MAX_CART_LINES: i64 = 100;

// ---
// Contrato do carrinho da sessão
// ---
// Toda operação leva o session_id no WHERE: duas sessões nunca enxergam
// as linhas uma da outra. Cada mutação é uma operação atômica de uma
// linha no banco, então várias abas da mesma sessão continuam corretas.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn list_lines(&self, session_id: &str) -> Result<Vec<CartLine>, AppError>;
    async fn find_line_for_product(
        &self,
        session_id: &str,
        product_id: Uuid,
        instructions: Option<&str>,
    ) -> Result<Option<CartLine>, AppError>;
    async fn insert_line(
        &self,
        session_id: &str,
        product_id: Uuid,
        quantity: i32,
        instructions: Option<&str>,
    ) -> Result<CartLine, AppError>;
    /// Retorna None quando a linha não existe nesta sessão.
    async fn set_quantity(
        &self,
        session_id: &str,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<Option<CartLine>, AppError>;
    async fn delete_line(&self, session_id: &str, line_id: Uuid) -> Result<bool, AppError>;
    async fn clear(&self, session_id: &str) -> Result<u64, AppError>;
}

#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn list_lines(&self, session_id: &str) -> Result<Vec<CartLine>, AppError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT * FROM cart_lines
            WHERE session_id = $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(MAX_CART_LINES)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    async fn find_line_for_product(
        &self,
        session_id: &str,
        product_id: Uuid,
        instructions: Option<&str>,
    ) -> Result<Option<CartLine>, AppError> {
        let line = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT * FROM cart_lines
            WHERE session_id = $1
              AND product_id = $2
              AND COALESCE(special_instructions, '') = COALESCE($3, '')
            "#,
        )
        .bind(session_id)
        .bind(product_id)
        .bind(instructions)
        .fetch_optional(&self.pool)
        .await?;
        Ok(line)
    }

    async fn insert_line(
        &self,
        session_id: &str,
        product_id: Uuid,
        quantity: i32,
        instructions: Option<&str>,
    ) -> Result<CartLine, AppError> {
        let line = sqlx::query_as::<_, CartLine>(
            r#"
            INSERT INTO cart_lines (session_id, product_id, quantity, special_instructions)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(product_id)
        .bind(quantity)
        .bind(instructions)
        .fetch_one(&self.pool)
        .await?;
        Ok(line)
    }

    async fn set_quantity(
        &self,
        session_id: &str,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<Option<CartLine>, AppError> {
        let line = sqlx::query_as::<_, CartLine>(
            r#"
            UPDATE cart_lines
            SET quantity = $3, updated_at = now()
            WHERE session_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(line_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(line)
    }

    async fn delete_line(&self, session_id: &str, line_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM cart_lines WHERE session_id = $1 AND id = $2",
        )
        .bind(session_id)
        .bind(line_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, session_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM cart_lines WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

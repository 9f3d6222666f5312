// src/db/order_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{NewOrder, Order, OrderItem},
};

// ---
// Contrato de gravação/consulta de pedidos
// ---
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Grava o cabeçalho e os itens juntos, ou nada.
    /// Se `client_reference` já existir, devolve o pedido já gravado em vez
    /// de duplicar (o reenvio após falha de aviso cai aqui).
    async fn insert_order_with_items(&self, new_order: &NewOrder) -> Result<Order, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError>;
    async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError>;
}

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert_order_with_items(&self, new_order: &NewOrder) -> Result<Order, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        // Cabeçalho e itens são escritos juntos ou não são escritos.
        let mut tx = self.pool.begin().await?;

        // Reenvio idempotente: a referência do cliente já foi gravada?
        if let Some(reference) = new_order.client_reference {
            let existing = sqlx::query_as::<_, Order>(
                "SELECT * FROM orders WHERE client_reference = $1",
            )
            .bind(reference)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(order) = existing {
                tx.commit().await?;
                return Ok(order);
            }
        }

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (business_id, client_reference, customer_name, customer_phone,
                 customer_email, notes, payment_method, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new_order.business_id)
        .bind(new_order.client_reference)
        .bind(&new_order.customer_name)
        .bind(&new_order.customer_phone)
        .bind(&new_order.customer_email)
        .bind(&new_order.notes)
        .bind(new_order.payment_method)
        .bind(new_order.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        for item in &new_order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items
                    (order_id, product_id, product_name, quantity,
                     unit_price, line_total, special_instructions)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.line_total)
            .bind(&item.special_instructions)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY product_name ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

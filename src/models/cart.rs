// src/models/cart.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::catalog::Product;

// ---
// 1. CartLine (Linha do carrinho)
// ---
// Escopada pela sessão anônima. Quantidade nunca chega a 0: a linha é
// removida em vez disso.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Uuid,
    pub session_id: String,
    pub product_id: Uuid,
    pub quantity: i32,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. CartLineView (Linha enriquecida com o produto)
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: Uuid,
    pub product: Product,
    pub quantity: i32,
    pub special_instructions: Option<String>,
    pub line_total: Decimal,
}

// ---
// 3. CartSummary (O carrinho que a tela consome)
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    pub total_items: i64,
    pub total_price: Decimal,
}

impl CartSummary {
    /// Os totais são sempre derivados das linhas, nunca gravados em
    /// separado (não há como divergirem dos dados das linhas).
    pub fn build(lines: Vec<CartLineView>) -> Self {
        let total_items = lines.iter().map(|l| i64::from(l.quantity)).sum();
        let total_price = lines.iter().map(|l| l.line_total).sum();
        Self { lines, total_items, total_price }
    }
}

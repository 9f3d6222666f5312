// src/models/order.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::business::PaymentMethodKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

// ---
// 1. Order (Cabeçalho do pedido)
// ---
// Criado exatamente uma vez por checkout bem-sucedido. O `total_amount`
// é a soma dos `line_total` dos itens no momento da criação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub business_id: Uuid,
    pub client_reference: Option<Uuid>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub payment_method: PaymentMethodKind,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. OrderItem (Item congelado do pedido)
// ---
// Fotografia da linha do carrinho no checkout; histórico imutável.
// `product_id` pode sumir se o produto for apagado depois, o snapshot fica.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub special_instructions: Option<String>,
}

// ---
// 3. NewOrder / NewOrderItem (O que o orquestrador manda gravar)
// ---
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub business_id: Uuid,
    pub client_reference: Option<Uuid>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub payment_method: PaymentMethodKind,
    pub total_amount: Decimal,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub special_instructions: Option<String>,
}

// ---
// 4. OrderDetail (Pedido + itens, para a tela de confirmação)
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

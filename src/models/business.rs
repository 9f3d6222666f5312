// src/models/business.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Business (O "Estabelecimento")
// ---
// A conta do restaurante. Criada e editada pelo painel do dono (fora deste
// serviço); para a vitrine pública é somente leitura.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub whatsapp_number: Option<String>,
    pub instagram: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Vec<PaymentMethodConfig>)]
    pub payment_methods: Json<Vec<PaymentMethodConfig>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. BusinessView (Projeção pública)
// ---
// O que a vitrine expõe do estabelecimento. A configuração de pagamento
// crua (flags de habilitado, chaves) fica de fora; o checkout consome a
// lista já filtrada pelo validador de métodos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessView {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub whatsapp_number: Option<String>,
    pub instagram: Option<String>,
    pub address: Option<String>,
}

impl From<&Business> for BusinessView {
    fn from(business: &Business) -> Self {
        Self {
            id: business.id,
            name: business.name.clone(),
            slug: business.slug.clone(),
            whatsapp_number: business.whatsapp_number.clone(),
            instagram: business.instagram.clone(),
            address: business.address.clone(),
        }
    }
}

// ---
// 3. PaymentMethodKind (Union fechada de métodos)
// ---
// Produzida uma única vez pelo validador de métodos e consumida em todo o
// resto apenas através deste enum. Nada de comparar strings soltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method_code", rename_all = "UPPERCASE")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum PaymentMethodKind {
    Cash,   // Dinheiro na entrega
    Pix,    // Chave e/ou QR
    Card,   // Cartão na entrega
    Picpay, // Carteira digital
}

impl PaymentMethodKind {
    /// Nome de exibição usado quando a configuração não define um.
    pub fn default_display_name(self) -> &'static str {
        match self {
            PaymentMethodKind::Cash => "Dinheiro",
            PaymentMethodKind::Pix => "Pix",
            PaymentMethodKind::Card => "Cartão",
            PaymentMethodKind::Picpay => "PicPay",
        }
    }
}

// ---
// 4. PaymentMethodConfig (Configuração por estabelecimento)
// ---
// Um descritor por método no JSONB `payment_methods`. Campos extras só
// fazem sentido para alguns tipos (chave de transferência, QR do Pix).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodConfig {
    pub kind: PaymentMethodKind,
    pub display_name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    pub transfer_key: Option<String>,
    pub qr_image_url: Option<String>,
}

// src/services/tenant_resolver.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{common::error::AppError, db::BusinessRepository, models::business::Business};

// ---
// TenantResolver: qual restaurante esta visita está vendo?
// ---
// Leitura pura, sem efeitos. A precedência é avaliada em ordem e a
// primeira regra que acerta ganha:
//   1. slug da URL pública;
//   2. estabelecimento vinculado ao dono autenticado;
//   3. o primeiro estabelecimento cadastrado (implantação single-tenant).
#[derive(Clone)]
pub struct TenantResolver {
    businesses: Arc<dyn BusinessRepository>,
}

impl TenantResolver {
    pub fn new(businesses: Arc<dyn BusinessRepository>) -> Self {
        Self { businesses }
    }

    pub async fn resolve(
        &self,
        slug: Option<&str>,
        owner_id: Option<Uuid>,
    ) -> Result<Business, AppError> {
        if let Some(slug) = slug.map(str::trim).filter(|s| !s.is_empty()) {
            // Slug errado NÃO cai para outro estabelecimento: o visitante
            // pediu um restaurante específico e precisa saber que não existe.
            return self
                .businesses
                .find_by_slug(slug)
                .await?
                .ok_or(AppError::BusinessNotFound);
        }

        if let Some(owner_id) = owner_id {
            if let Some(business) = self.businesses.find_by_owner(owner_id).await? {
                return Ok(business);
            }
        }

        self.businesses
            .find_first()
            .await?
            .ok_or(AppError::BusinessNotFound)
    }
}

// src/handlers/menu.rs

use axum::{extract::{Query, State}, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::OwnerContext,
    models::business::BusinessView,
    models::catalog::{Category, ProductView},
    services::catalog::{filter_products, paginate, Page, DEFAULT_PAGE_SIZE},
};

// ---
// Query: tela de navegação do cardápio
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    /// Slug público do estabelecimento (ex.: "pizzaria-do-ze")
    pub business: Option<String>,
    /// Filtro de categoria; ausente = "todas"
    pub category: Option<Uuid>,
    /// Página atual. Ao trocar de categoria o cliente omite e volta para 1.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub business: BusinessView,
    pub categories: Vec<Category>,
    pub products: Page<ProductView>,
}

// ---
// Handler: get_menu
// ---
// Resolve o tenant, carrega categorias e produtos em paralelo e entrega a
// página pedida. Catálogo vazio vira o estado explícito "cardápio
// indisponível", nunca uma tela em branco.
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "Cardápio",
    params(MenuQuery),
    responses(
        (status = 200, description = "Cardápio do estabelecimento resolvido", body = MenuResponse),
        (status = 404, description = "Estabelecimento não encontrado ou cardápio indisponível"),
        (status = 503, description = "Instabilidade ao carregar; tentar de novo é manual"),
    )
)]
pub async fn get_menu(
    State(app_state): State<AppState>,
    owner: OwnerContext,
    Query(query): Query<MenuQuery>,
) -> Result<impl IntoResponse, AppError> {
    let business = app_state
        .tenant_resolver
        .resolve(query.business.as_deref(), owner.0)
        .await?;

    let (categories, products) = app_state.catalog_service.load_menu(business.id).await?;

    if categories.is_empty() && products.is_empty() {
        return Err(AppError::MenuUnavailable);
    }

    let filtered = filter_products(&products, query.category);
    let page = paginate(
        &filtered,
        query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        query.page.unwrap_or(1),
    );

    Ok((
        StatusCode::OK,
        Json(MenuResponse {
            business: BusinessView::from(&business),
            categories,
            products: page,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trocar_de_categoria_volta_para_a_pagina_1() {
        // Ao trocar o filtro o cliente omite `page`; a página pedida ao
        // paginador volta a ser 1 em vez de arrastar a paginação antiga.
        let query: MenuQuery = serde_json::from_value(serde_json::json!({
            "category": Uuid::new_v4(),
        }))
        .expect("query sem página");

        assert_eq!(query.page.unwrap_or(1), 1);
        assert_eq!(query.page_size.unwrap_or(DEFAULT_PAGE_SIZE), DEFAULT_PAGE_SIZE);
    }
}

// src/handlers/cart.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::session::SessionContext,
    models::cart::CartSummary,
};

// ---
// Payload: AddCartItemPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemPayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade mínima é 1."))]
    pub quantity: i32,

    #[validate(length(max = 500, message = "A observação é longa demais."))]
    pub special_instructions: Option<String>,
}

// ---
// Payload: UpdateCartItemPayload
// ---
// Sem validação de mínimo aqui de propósito: quantidade <= 0 segue pelo
// mesmo caminho da remoção (a tela confirma antes, como na remoção).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemPayload {
    pub quantity: i32,
}

// ---
// Handler: get_cart
// ---
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Carrinho",
    params(
        ("x-session-id" = Option<String>, Header, description = "Id da sessão anônima; criado pelo servidor se ausente"),
    ),
    responses(
        (status = 200, description = "Carrinho da sessão com totais derivados", body = CartSummary),
    )
)]
pub async fn get_cart(
    State(app_state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.cart_service.summary(&session).await?;
    Ok((StatusCode::OK, Json(summary)))
}

// ---
// Handler: add_item
// ---
#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Carrinho",
    request_body = AddCartItemPayload,
    responses(
        (status = 201, description = "Item adicionado (ou somado à linha existente)", body = CartSummary),
        (status = 404, description = "Produto inexistente ou inativo"),
    )
)]
pub async fn add_item(
    State(app_state): State<AppState>,
    session: SessionContext,
    Json(payload): Json<AddCartItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let summary = app_state
        .cart_service
        .add(
            &session,
            payload.product_id,
            payload.quantity,
            payload.special_instructions,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}

// ---
// Handler: update_item
// ---
#[utoipa::path(
    patch,
    path = "/api/cart/items/{line_id}",
    tag = "Carrinho",
    params(("line_id" = Uuid, Path, description = "Linha do carrinho")),
    request_body = UpdateCartItemPayload,
    responses(
        (status = 200, description = "Quantidade atualizada (ou linha removida, se <= 0)", body = CartSummary),
        (status = 404, description = "Linha não encontrada nesta sessão"),
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(line_id): Path<Uuid>,
    Json(payload): Json<UpdateCartItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .cart_service
        .set_quantity(&session, line_id, payload.quantity)
        .await?;
    Ok((StatusCode::OK, Json(summary)))
}

// ---
// Handler: remove_item
// ---
#[utoipa::path(
    delete,
    path = "/api/cart/items/{line_id}",
    tag = "Carrinho",
    params(("line_id" = Uuid, Path, description = "Linha do carrinho")),
    responses(
        (status = 200, description = "Linha removida", body = CartSummary),
        (status = 404, description = "Linha não encontrada nesta sessão"),
    )
)]
pub async fn remove_item(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(line_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.cart_service.remove(&session, line_id).await?;
    Ok((StatusCode::OK, Json(summary)))
}

// ---
// Handler: clear_cart
// ---
#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Carrinho",
    responses((status = 204, description = "Carrinho esvaziado")),
)]
pub async fn clear_cart(
    State(app_state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    app_state.cart_service.clear(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

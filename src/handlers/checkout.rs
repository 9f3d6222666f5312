// src/handlers/checkout.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::OwnerContext, session::SessionContext},
    models::business::PaymentMethodKind,
    models::order::{Order, OrderDetail},
    services::{
        checkout::CheckoutRequest,
        payment::{PaymentMethodDescriptor, PaymentMethodValidator},
        SubmissionOutcome,
    },
};

// ---
// Query: métodos de pagamento da tela de checkout/reserva
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaymentMethodsQuery {
    /// Slug público do estabelecimento
    pub business: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodsResponse {
    pub methods: Vec<PaymentMethodDescriptor>,
    /// Pré-seleção quando o cliente ainda não escolheu: o primeiro da lista.
    pub default_method: Option<PaymentMethodKind>,
}

// ---
// Payload: CheckoutPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    /// Slug do estabelecimento (mesma resolução da vitrine)
    pub business: Option<String>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub customer_name: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub customer_phone: String,

    #[validate(email(message = "E-mail inválido."))]
    pub customer_email: Option<String>,

    pub notes: Option<String>,

    pub payment_method: PaymentMethodKind,

    /// Referência gerada pelo cliente; o reenvio com a mesma referência
    /// reaproveita o pedido já gravado em vez de duplicar.
    pub client_reference: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// "confirmed" ou "recorded_not_notified"
    pub status: String,
    pub message: String,
    pub order: Order,
}

// ---
// Handler: get_payment_methods
// ---
#[utoipa::path(
    get,
    path = "/api/payment-methods",
    tag = "Checkout",
    params(PaymentMethodsQuery),
    responses(
        (status = 200, description = "Métodos habilitados (lista vazia é um estado válido)", body = PaymentMethodsResponse),
        (status = 404, description = "Estabelecimento não encontrado"),
    )
)]
pub async fn get_payment_methods(
    State(app_state): State<AppState>,
    owner: OwnerContext,
    Query(query): Query<PaymentMethodsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let business = app_state
        .tenant_resolver
        .resolve(query.business.as_deref(), owner.0)
        .await?;

    let methods = PaymentMethodValidator::available_methods(&business);
    let default_method = PaymentMethodValidator::default_method(&methods);

    Ok((
        StatusCode::OK,
        Json(PaymentMethodsResponse { methods, default_method }),
    ))
}

// ---
// Handler: submit_checkout
// ---
// A confirmação explícita do cliente é o POST em si; daqui para frente é a
// fase Submitting: gravar o pedido e só então avisar a equipe.
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "Checkout",
    request_body = CheckoutPayload,
    responses(
        (status = 201, description = "Pedido gravado e equipe avisada", body = CheckoutResponse),
        (status = 400, description = "Campos obrigatórios ausentes ou inválidos"),
        (status = 422, description = "Carrinho vazio ou método de pagamento indisponível"),
        (status = 502, description = "Pedido gravado, mas o aviso à equipe falhou", body = CheckoutResponse),
        (status = 503, description = "Não foi possível registrar o pedido; reenvio é seguro"),
    )
)]
pub async fn submit_checkout(
    State(app_state): State<AppState>,
    owner: OwnerContext,
    session: SessionContext,
    Json(payload): Json<CheckoutPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let business = app_state
        .tenant_resolver
        .resolve(payload.business.as_deref(), owner.0)
        .await?;

    let request = CheckoutRequest {
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        customer_email: payload.customer_email,
        notes: payload.notes,
        payment_method: payload.payment_method,
        client_reference: payload.client_reference,
    };

    let outcome = app_state
        .checkout_service
        .submit(&session, &business, request)
        .await?;

    let response = match outcome {
        SubmissionOutcome::Completed(order) => (
            StatusCode::CREATED,
            Json(CheckoutResponse {
                status: "confirmed".to_string(),
                message: "Pedido enviado ao restaurante!".to_string(),
                order,
            }),
        )
            .into_response(),
        // Estado parcial, distinto de "não foi registrado": o pedido
        // existe, só o aviso falhou.
        SubmissionOutcome::RecordedNotNotified(order) => (
            StatusCode::BAD_GATEWAY,
            Json(CheckoutResponse {
                status: "recorded_not_notified".to_string(),
                message: "Seu pedido foi registrado, mas não conseguimos avisar o restaurante. \
                          Entre em contato com o estabelecimento."
                    .to_string(),
                order,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

// ---
// Handler: get_order (tela de confirmação)
// ---
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Checkout",
    params(("id" = Uuid, Path, description = "Id do pedido")),
    responses(
        (status = 200, description = "Pedido com os itens congelados", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado"),
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.checkout_service.find_order(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

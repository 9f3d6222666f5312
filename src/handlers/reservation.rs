// src/handlers/reservation.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::OwnerContext,
    models::business::PaymentMethodKind,
    models::reservation::{is_valid_slot, time_slots, Reservation},
    services::{reservation::ReservationRequest, SubmissionOutcome},
};

// ---
// Validação customizada: grade de horários
// ---
fn validate_time_slot(time: &NaiveTime) -> Result<(), ValidationError> {
    if !is_valid_slot(*time) {
        let mut error = ValidationError::new("time_slot");
        error.message =
            Some("Os horários vão de meia em meia hora, das 11:00 às 22:30.".into());
        return Err(error);
    }
    Ok(())
}

// ---
// Payload: ReservationPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    /// Slug do estabelecimento (mesma resolução da vitrine)
    pub business: Option<String>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub customer_name: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub customer_phone: String,

    #[validate(email(message = "E-mail inválido."))]
    pub customer_email: Option<String>,

    #[validate(range(min = 1, message = "O número de pessoas deve ser pelo menos 1."))]
    pub party_size: i32,

    pub reservation_date: NaiveDate,

    #[validate(custom(function = "validate_time_slot"))]
    pub reservation_time: NaiveTime,

    pub special_requests: Option<String>,

    pub payment_method: PaymentMethodKind,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    /// "confirmed" ou "recorded_not_notified"
    pub status: String,
    pub message: String,
    pub reservation: Reservation,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotsResponse {
    #[schema(value_type = Vec<String>, example = json!(["11:00:00", "11:30:00"]))]
    pub slots: Vec<NaiveTime>,
}

// ---
// Handler: get_time_slots
// ---
// A grade que o formulário de reserva mostra no seletor de horários.
#[utoipa::path(
    get,
    path = "/api/reservations/slots",
    tag = "Reservas",
    responses(
        (status = 200, description = "Horários válidos, de meia em meia hora", body = TimeSlotsResponse),
    )
)]
pub async fn get_time_slots() -> impl IntoResponse {
    (StatusCode::OK, Json(TimeSlotsResponse { slots: time_slots() }))
}

// ---
// Handler: submit_reservation
// ---
// Mesma sequência do checkout (persistir, depois avisar), sem carrinho.
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Reservas",
    request_body = ReservationPayload,
    responses(
        (status = 201, description = "Reserva gravada como pendente e equipe avisada", body = ReservationResponse),
        (status = 400, description = "Campos obrigatórios ausentes ou inválidos"),
        (status = 422, description = "Método de pagamento indisponível"),
        (status = 502, description = "Reserva gravada, mas o aviso à equipe falhou", body = ReservationResponse),
        (status = 503, description = "Não foi possível registrar a reserva; reenvio é seguro"),
    )
)]
pub async fn submit_reservation(
    State(app_state): State<AppState>,
    owner: OwnerContext,
    Json(payload): Json<ReservationPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let business = app_state
        .tenant_resolver
        .resolve(payload.business.as_deref(), owner.0)
        .await?;

    let request = ReservationRequest {
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        customer_email: payload.customer_email,
        party_size: payload.party_size,
        reservation_date: payload.reservation_date,
        reservation_time: payload.reservation_time,
        special_requests: payload.special_requests,
        payment_method: payload.payment_method,
    };

    let outcome = app_state
        .reservation_service
        .submit(&business, request)
        .await?;

    let response = match outcome {
        SubmissionOutcome::Completed(reservation) => (
            StatusCode::CREATED,
            Json(ReservationResponse {
                status: "confirmed".to_string(),
                message: "Reserva enviada ao restaurante!".to_string(),
                reservation,
            }),
        )
            .into_response(),
        SubmissionOutcome::RecordedNotNotified(reservation) => (
            StatusCode::BAD_GATEWAY,
            Json(ReservationResponse {
                status: "recorded_not_notified".to_string(),
                message: "Sua reserva foi registrada, mas não conseguimos avisar o restaurante. \
                          Entre em contato com o estabelecimento."
                    .to_string(),
                reservation,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

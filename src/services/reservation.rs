// src/services/reservation.rs

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::ReservationRepository,
    models::{
        business::{Business, PaymentMethodKind},
        reservation::{is_valid_slot, NewReservation, Reservation},
    },
    services::{
        notifier::{NotifyError, StaffNotifier},
        payment::PaymentMethodValidator,
        validate_contact, SubmissionOutcome,
    },
};

// ---
// O que o formulário de reserva envia, já desserializado
// ---
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub party_size: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub special_requests: Option<String>,
    pub payment_method: PaymentMethodKind,
}

// ---
// ReservationService: a mesma sequência persistir-depois-avisar do
// checkout, sem carrinho envolvido
// ---
#[derive(Clone)]
pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    notifier: Arc<dyn StaffNotifier>,
    fallback_staff_phone: Option<String>,
}

impl ReservationService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        notifier: Arc<dyn StaffNotifier>,
        fallback_staff_phone: Option<String>,
    ) -> Self {
        Self { reservations, notifier, fallback_staff_phone }
    }

    pub async fn submit(
        &self,
        business: &Business,
        request: ReservationRequest,
    ) -> Result<SubmissionOutcome<Reservation>, AppError> {
        // Campos obrigatórios: nada inválido chega à persistência.
        validate_contact(&request.customer_name, &request.customer_phone)?;
        validate_details(request.party_size, request.reservation_time)?;

        let methods = PaymentMethodValidator::available_methods(business);
        PaymentMethodValidator::ensure_available(&methods, request.payment_method)?;

        let new_reservation = NewReservation {
            business_id: business.id,
            customer_name: request.customer_name.trim().to_string(),
            customer_phone: request.customer_phone.trim().to_string(),
            customer_email: request.customer_email.clone(),
            party_size: request.party_size,
            reservation_date: request.reservation_date,
            reservation_time: request.reservation_time,
            special_requests: request.special_requests.clone(),
            payment_method: request.payment_method,
        };

        // Fase 1: persistir (status nasce PENDING).
        let reservation = match self.reservations.insert(&new_reservation).await {
            Ok(reservation) => reservation,
            Err(e) => {
                tracing::error!("Falha ao gravar a reserva: {}", e);
                return Err(AppError::ReservationNotRecorded);
            }
        };

        // Fase 2: avisar a equipe, só depois de gravado.
        let message = format_reservation_message(business, &reservation);
        if let Err(e) = self.notify(business, &message).await {
            tracing::warn!("Reserva {} gravada, mas o aviso falhou: {}", reservation.id, e);
            return Ok(SubmissionOutcome::RecordedNotNotified(reservation));
        }

        Ok(SubmissionOutcome::Completed(reservation))
    }

    async fn notify(&self, business: &Business, message: &str) -> Result<(), NotifyError> {
        let phone = business
            .whatsapp_number
            .as_deref()
            .or(self.fallback_staff_phone.as_deref())
            .ok_or(NotifyError::MissingPhone)?;
        self.notifier.send_text(phone, message).await
    }
}

fn validate_details(party_size: i32, reservation_time: NaiveTime) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();

    if party_size < 1 {
        let mut error = ValidationError::new("range");
        error.message = Some("O número de pessoas deve ser pelo menos 1.".into());
        errors.add("partySize".into(), error);
    }
    if !is_valid_slot(reservation_time) {
        let mut error = ValidationError::new("time_slot");
        error.message =
            Some("Os horários vão de meia em meia hora, das 11:00 às 22:30.".into());
        errors.add("reservationTime".into(), error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}

// Modelo de mensagem específico de reserva.
fn format_reservation_message(business: &Business, reservation: &Reservation) -> String {
    let mut message = String::new();
    message.push_str(&format!("*Nova reserva* | {}\n\n", business.name));
    message.push_str(&format!(
        "Cliente: {} ({})\n",
        reservation.customer_name, reservation.customer_phone
    ));
    if let Some(email) = &reservation.customer_email {
        message.push_str(&format!("E-mail: {}\n", email));
    }
    message.push_str(&format!("Pessoas: {}\n", reservation.party_size));
    message.push_str(&format!(
        "Data: {} às {}\n",
        reservation.reservation_date.format("%d/%m/%Y"),
        reservation.reservation_time.format("%H:%M"),
    ));
    message.push_str(&format!(
        "Pagamento: {}\n",
        reservation.payment_method.default_display_name()
    ));
    if let Some(requests) = &reservation.special_requests {
        message.push_str(&format!("Pedidos especiais: {}\n", requests));
    }
    message
}

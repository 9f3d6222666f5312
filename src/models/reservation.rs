// src/models/reservation.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::business::PaymentMethodKind;

// Grade fixa de horários: de meia em meia hora, das 11:00 às 22:30.
const FIRST_SLOT_MINUTES: u32 = 11 * 60;
const LAST_SLOT_MINUTES: u32 = 22 * 60 + 30;
const SLOT_STEP_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

// ---
// 1. Reservation (Reserva de mesa)
// ---
// Criada uma única vez por envio bem-sucedido, sempre com status PENDING.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub business_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub party_size: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub special_requests: Option<String>,
    pub payment_method: PaymentMethodKind,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. NewReservation (O que o orquestrador manda gravar)
// ---
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub business_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub party_size: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub special_requests: Option<String>,
    pub payment_method: PaymentMethodKind,
}

/// Todos os horários válidos da grade, em ordem.
pub fn time_slots() -> Vec<NaiveTime> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(SLOT_STEP_MINUTES as usize)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
        .collect()
}

/// Um horário é válido se cai exatamente na grade de meia em meia hora.
pub fn is_valid_slot(time: NaiveTime) -> bool {
    let minutes = time.hour() * 60 + time.minute();
    time.minute() % SLOT_STEP_MINUTES == 0
        && time.second() == 0
        && time.nanosecond() == 0
        && (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES).contains(&minutes)
}

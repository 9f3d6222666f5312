// src/db/reservation_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::reservation::{NewReservation, Reservation},
};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Grava a reserva com status PENDING.
    async fn insert(&self, new_reservation: &NewReservation) -> Result<Reservation, AppError>;
}

#[derive(Clone)]
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn insert(&self, new_reservation: &NewReservation) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations
                (business_id, customer_name, customer_phone, customer_email,
                 party_size, reservation_date, reservation_time,
                 special_requests, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new_reservation.business_id)
        .bind(&new_reservation.customer_name)
        .bind(&new_reservation.customer_phone)
        .bind(&new_reservation.customer_email)
        .bind(new_reservation.party_size)
        .bind(new_reservation.reservation_date)
        .bind(new_reservation.reservation_time)
        .bind(&new_reservation.special_requests)
        .bind(new_reservation.payment_method)
        .fetch_one(&self.pool)
        .await?;
        Ok(reservation)
    }
}

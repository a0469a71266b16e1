//! Reservation repository

use sqlx::PgPool;

use crate::error::{DbError, Result};
use crate::models::{NewReservation, Reservation};

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List up to `limit` reservations made by `guest_id`, oldest id first.
    pub async fn list_for_guest(&self, guest_id: i32, limit: u32) -> Result<Vec<Reservation>> {
        tracing::debug!(params = 2, "reservations for guest");
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, guest_id, property_id, start_date, end_date
            FROM reservations
            WHERE guest_id = $1
            ORDER BY id ASC
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(reservations)
    }

    /// Insert a reservation, returning the stored row.
    pub async fn create(&self, reservation: &NewReservation) -> Result<Reservation> {
        tracing::debug!(params = 4, "reservation insert");
        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (guest_id, property_id, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, guest_id, property_id, start_date, end_date
            "#,
        )
        .bind(reservation.guest_id)
        .bind(reservation.property_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .fetch_one(self.pool)
        .await
        .map_err(|err| DbError::from_insert("reservation", err))
    }
}

//! Reservations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::ValidationError;

/// Reservation record from `reservations`
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i32,
    pub guest_id: i32,
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Payload for inserting a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub guest_id: i32,
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewReservation {
    /// A stay must end after it starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_date <= self.start_date {
            return Err(ValidationError::InvalidFormat {
                field: "end_date",
                reason: "must be after start_date",
            });
        }
        Ok(())
    }

    pub fn into_reservation(self, id: i32) -> Reservation {
        Reservation {
            id,
            guest_id: self.guest_id,
            property_id: self.property_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

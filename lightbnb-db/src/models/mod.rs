//! Row types and validated insert payloads
//!
//! Row structs mirror their tables one-to-one. Insert payloads are checked
//! before they reach a store; invalid input returns ValidationError, not panic.

pub mod property;
pub mod reservation;
pub mod user;
pub mod validation;

pub use property::{NewProperty, Property, PropertyListing};
pub use reservation::{NewReservation, Reservation};
pub use user::{NewUser, User};
pub use validation::ValidationError;

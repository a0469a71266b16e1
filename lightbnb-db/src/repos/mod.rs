//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Parameterized statements only, positional `$n` placeholders
//! - Handles conflicts via constraints (no check-then-insert)
//! - Absent rows are `Ok(None)` / empty `Vec`, never errors

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use users::UserRepo;

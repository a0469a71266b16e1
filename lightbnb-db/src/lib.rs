//! lightbnb-db: query layer for the LightBnB rental app
//!
//! Fetches and inserts users, properties and reservations in PostgreSQL
//! and builds the filtered listing search. Every operation goes through
//! the [`Store`] trait, implemented by [`PgStore`] and by the in-memory
//! [`MemoryStore`] used for tests and offline fixtures.

pub mod config;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repos;
pub mod search;
pub mod store;

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, Result};
pub use memory::MemoryStore;
pub use models::{
    NewProperty, NewReservation, NewUser, Property, PropertyListing, Reservation, User,
    ValidationError,
};
pub use pool::{create_pool, create_pool_with_options};
pub use search::{PropertyFilter, SearchParam, SearchQuery};
pub use store::{PgStore, Store, DEFAULT_LIMIT};

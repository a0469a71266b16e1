//! Storage interface and the PostgreSQL implementation
//!
//! [`Store`] is the public contract callers depend on. [`PgStore`] owns the
//! pool and delegates to the per-table repositories; [`crate::MemoryStore`]
//! implements the same trait without a database.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::config::DbConfig;
use crate::error::Result;
use crate::models::{NewProperty, NewUser, Property, PropertyListing, Reservation, User};
use crate::pool::create_pool;
use crate::repos::{PropertyRepo, ReservationRepo, UserRepo};
use crate::search::PropertyFilter;

pub use crate::search::DEFAULT_LIMIT;

/// Query operations over users, reservations and properties
#[async_trait]
pub trait Store: Send + Sync {
    /// User whose email equals `email` exactly, if any.
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>>;

    /// User with primary key `id`, if any.
    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>>;

    /// Insert a user; a taken email is `DbError::Conflict`.
    async fn add_user(&self, user: NewUser) -> Result<User>;

    /// Up to `limit` reservations made by `guest_id`.
    async fn get_all_reservations(&self, guest_id: i32, limit: u32) -> Result<Vec<Reservation>>;

    /// Up to `limit` listings matching `filter`, cheapest first.
    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> Result<Vec<PropertyListing>>;

    /// Insert a property with a store-assigned id.
    async fn add_property(&self, property: NewProperty) -> Result<Property>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a pool from `config` and wrap it.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        Ok(Self::new(create_pool(config).await?))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema if it doesn't exist.
    pub async fn migrate(&self) -> Result<()> {
        crate::migrations::run(&self.pool).await
    }

    /// Record a review score; used to seed listings.
    pub async fn add_review(&self, property_id: i32, rating: i16) -> Result<()> {
        PropertyRepo::new(&self.pool)
            .add_review(property_id, rating)
            .await
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        tracing::debug!("draining connection pool");
        self.pool.close().await;
    }
}

/// Log store failures before handing them back to the caller.
fn logged<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        if err.is_conflict() {
            tracing::warn!(operation, error = %err, "store rejected write");
        } else {
            tracing::error!(operation, error = %err, "store operation failed");
        }
    }
    result
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self))]
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        logged(
            "get_user_with_email",
            UserRepo::new(&self.pool).get_by_email(email).await,
        )
    }

    #[instrument(skip(self))]
    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>> {
        logged("get_user_with_id", UserRepo::new(&self.pool).get(id).await)
    }

    #[instrument(skip_all, fields(email = %user.email()))]
    async fn add_user(&self, user: NewUser) -> Result<User> {
        logged("add_user", UserRepo::new(&self.pool).create(&user).await)
    }

    #[instrument(skip(self))]
    async fn get_all_reservations(&self, guest_id: i32, limit: u32) -> Result<Vec<Reservation>> {
        logged(
            "get_all_reservations",
            ReservationRepo::new(&self.pool)
                .list_for_guest(guest_id, limit)
                .await,
        )
    }

    #[instrument(skip(self))]
    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> Result<Vec<PropertyListing>> {
        logged(
            "get_all_properties",
            PropertyRepo::new(&self.pool).search(filter, limit).await,
        )
    }

    #[instrument(skip_all, fields(title = %property.title))]
    async fn add_property(&self, property: NewProperty) -> Result<Property> {
        property.validate()?;
        logged(
            "add_property",
            PropertyRepo::new(&self.pool).create(&property).await,
        )
    }
}

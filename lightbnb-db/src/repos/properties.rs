//! Property repository
//!
//! - search: dynamic WHERE/HAVING from [`SearchQuery`], one query with a
//!   LEFT JOIN on reviews (no N+1)
//! - create: INSERT ... RETURNING with a SERIAL id, unknown owner is NotFound

use sqlx::PgPool;

use crate::error::{DbError, Result};
use crate::models::{NewProperty, Property, PropertyListing};
use crate::search::{PropertyFilter, SearchParam, SearchQuery};

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search listings, cheapest first, capped at `limit`.
    pub async fn search(&self, filter: &PropertyFilter, limit: u32) -> Result<Vec<PropertyListing>> {
        let search = SearchQuery::build(filter, limit);
        tracing::debug!(
            params = search.params().len(),
            unfiltered = filter.is_empty(),
            sql = search.sql(),
            "property search"
        );

        // Bind in the order the builder appended, matching $1..$n
        let mut query = sqlx::query_as::<_, PropertyListing>(search.sql());
        for param in search.params() {
            query = match param {
                SearchParam::Text(value) => query.bind(value.as_str()),
                SearchParam::Int(value) => query.bind(*value),
                SearchParam::Float(value) => query.bind(*value),
                SearchParam::Limit(value) => query.bind(*value),
            };
        }

        let listings = query.fetch_all(self.pool).await?;
        Ok(listings)
    }

    /// Insert a property, returning the stored row with its generated id.
    pub async fn create(&self, property: &NewProperty) -> Result<Property> {
        tracing::debug!(params = 14, "property insert");
        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, street, city, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                DbError::not_found("user", property.owner_id)
            }
            _ => DbError::from_insert("property", err),
        })
    }

    /// Record a review score for a property.
    pub async fn add_review(&self, property_id: i32, rating: i16) -> Result<()> {
        tracing::debug!(params = 2, "review insert");
        sqlx::query("INSERT INTO property_reviews (property_id, rating) VALUES ($1, $2)")
            .bind(property_id)
            .bind(rating)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

//! In-memory store
//!
//! Implements [`Store`] with the same semantics as the PostgreSQL store:
//! unique emails, store-assigned ids, and listing search evaluated by the
//! same [`PropertyFilter`] rules. Ids come from atomic counters so
//! concurrent inserts never share an id.
//!
//! Can be seeded from JSON fixtures keyed by id:
//!
//! ```json
//! { "1": { "name": "Devin Sanders", "email": "tristanjacobs@gmail.com", "password": "..." } }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{DbError, Result};
use crate::models::{
    NewProperty, NewReservation, NewUser, Property, PropertyListing, Reservation, User,
};
use crate::search::PropertyFilter;
use crate::store::Store;

const USERS_FILE: &str = "users.json";
const PROPERTIES_FILE: &str = "properties.json";
const RESERVATIONS_FILE: &str = "reservations.json";
const REVIEWS_FILE: &str = "property_reviews.json";

#[derive(Debug, Clone, Copy, Deserialize)]
struct Review {
    property_id: i32,
    rating: i16,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    properties: BTreeMap<i32, Property>,
    reservations: BTreeMap<i32, Reservation>,
    reviews: Vec<Review>,
}

impl Tables {
    /// Average rating per reviewed property
    fn average_ratings(&self) -> HashMap<i32, f64> {
        let mut totals: HashMap<i32, (f64, u32)> = HashMap::new();
        for review in &self.reviews {
            let entry = totals.entry(review.property_id).or_default();
            entry.0 += f64::from(review.rating);
            entry.1 += 1;
        }
        totals
            .into_iter()
            .map(|(id, (sum, count))| (id, sum / f64::from(count)))
            .collect()
    }
}

/// Store backed by process memory
pub struct MemoryStore {
    tables: RwLock<Tables>,
    next_user_id: AtomicI32,
    next_property_id: AtomicI32,
    next_reservation_id: AtomicI32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store; ids start at 1.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            next_user_id: AtomicI32::new(1),
            next_property_id: AtomicI32::new(1),
            next_reservation_id: AtomicI32::new(1),
        }
    }

    /// Seed users and properties from id-keyed JSON objects.
    ///
    /// The object key is the record id. Id counters continue after the
    /// largest seeded id.
    pub fn from_json_files(users_path: &Path, properties_path: &Path) -> Result<Self> {
        let users: BTreeMap<i32, User> = read_keyed(users_path)?
            .into_iter()
            .map(|(id, mut user): (i32, User)| {
                user.id = id;
                (id, user)
            })
            .collect();
        let properties: BTreeMap<i32, Property> = read_keyed(properties_path)?
            .into_iter()
            .map(|(id, mut property): (i32, Property)| {
                property.id = id;
                (id, property)
            })
            .collect();

        tracing::debug!(
            users = users.len(),
            properties = properties.len(),
            "seeding memory store"
        );

        let next_user_id = next_id(users_path, &users)?;
        let next_property_id = next_id(properties_path, &properties)?;

        let store = Self::new();
        store.next_user_id.store(next_user_id, Ordering::SeqCst);
        store
            .next_property_id
            .store(next_property_id, Ordering::SeqCst);
        {
            let mut tables = store.write();
            tables.users = users;
            tables.properties = properties;
        }
        Ok(store)
    }

    /// Seed from a directory holding `users.json` and `properties.json`,
    /// plus optional `reservations.json` and `property_reviews.json` arrays.
    pub fn from_json_dir(dir: &Path) -> Result<Self> {
        let store = Self::from_json_files(&dir.join(USERS_FILE), &dir.join(PROPERTIES_FILE))?;

        let reservations_path = dir.join(RESERVATIONS_FILE);
        if reservations_path.exists() {
            let reservations: Vec<NewReservation> = read_json(&reservations_path)?;
            for reservation in reservations {
                store.add_reservation(reservation)?;
            }
        }

        let reviews_path = dir.join(REVIEWS_FILE);
        if reviews_path.exists() {
            let reviews: Vec<Review> = read_json(&reviews_path)?;
            for review in reviews {
                store.add_review(review.property_id, review.rating)?;
            }
        }

        Ok(store)
    }

    /// Record a review score for an existing property.
    pub fn add_review(&self, property_id: i32, rating: i16) -> Result<()> {
        let mut tables = self.write();
        if !tables.properties.contains_key(&property_id) {
            return Err(DbError::not_found("property", property_id));
        }
        tables.reviews.push(Review {
            property_id,
            rating,
        });
        Ok(())
    }

    /// Insert a reservation for an existing guest and property.
    pub fn add_reservation(&self, reservation: NewReservation) -> Result<Reservation> {
        reservation.validate()?;
        let mut tables = self.write();
        if !tables.users.contains_key(&reservation.guest_id) {
            return Err(DbError::not_found("user", reservation.guest_id));
        }
        if !tables.properties.contains_key(&reservation.property_id) {
            return Err(DbError::not_found("property", reservation.property_id));
        }

        let id = self.next_reservation_id.fetch_add(1, Ordering::SeqCst);
        let reservation = reservation.into_reservation(id);
        tables.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    pub fn property_count(&self) -> usize {
        self.read().properties.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Id after the largest seeded key
fn next_id<T>(path: &Path, records: &BTreeMap<i32, T>) -> Result<i32> {
    match records.keys().next_back() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            DbError::fixture(path, format!("id {} leaves no room for new rows", max))
        }),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).map_err(|err| DbError::fixture(path, err.to_string()))?;
    serde_json::from_str(&content).map_err(|err| DbError::fixture(path, err.to_string()))
}

fn read_keyed<T: DeserializeOwned>(path: &Path) -> Result<Vec<(i32, T)>> {
    let raw: BTreeMap<String, T> = read_json(path)?;
    raw.into_iter()
        .map(|(key, value)| {
            key.trim()
                .parse::<i32>()
                .map(|id| (id, value))
                .map_err(|_| DbError::fixture(path, format!("key '{}' is not an integer id", key)))
        })
        .collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .read()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn add_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.write();
        if tables.users.values().any(|u| u.email == user.email()) {
            return Err(DbError::conflict(
                "user",
                format!("email '{}' already registered", user.email()),
            ));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = user.into_user(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_all_reservations(&self, guest_id: i32, limit: u32) -> Result<Vec<Reservation>> {
        Ok(self
            .read()
            .reservations
            .values()
            .filter(|r| r.guest_id == guest_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> Result<Vec<PropertyListing>> {
        let tables = self.read();
        let ratings = tables.average_ratings();

        let mut listings: Vec<PropertyListing> = tables
            .properties
            .values()
            .filter(|property| filter.matches(property))
            .map(|property| PropertyListing {
                property: property.clone(),
                average_rating: ratings.get(&property.id).copied(),
            })
            .filter(|listing| filter.matches_rating(listing.average_rating))
            .collect();

        listings.sort_by_key(|l| (l.property.cost_per_night, l.property.id));
        listings.truncate(limit as usize);
        Ok(listings)
    }

    async fn add_property(&self, property: NewProperty) -> Result<Property> {
        property.validate()?;
        let mut tables = self.write();
        if !tables.users.contains_key(&property.owner_id) {
            return Err(DbError::not_found("user", property.owner_id));
        }

        let id = self.next_property_id.fetch_add(1, Ordering::SeqCst);
        let property = property.into_property(id);
        tables.properties.insert(id, property.clone());
        Ok(property)
    }
}

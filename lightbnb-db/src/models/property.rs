//! Properties and search listings

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{non_negative, required_text, ValidationError};

const MAX_TITLE_LEN: usize = 255;
const MAX_FIELD_LEN: usize = 255;

/// Property record from `properties`
///
/// `cost_per_night` is in the smallest currency unit (cents).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

/// Property row with its aggregated review score, as returned by search
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// `None` when the property has no reviews
    pub average_rating: Option<f64>,
}

/// Payload for inserting a property
///
/// Deserializes from the same JSON shape as [`Property`] minus `id`;
/// call [`NewProperty::validate`] before storing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_photo_url: String,
    #[serde(default)]
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    #[serde(default)]
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub post_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

impl NewProperty {
    /// Check text lengths and that counts and price are non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("title", &self.title, MAX_TITLE_LEN)?;
        required_text("city", &self.city, MAX_FIELD_LEN)?;
        for (field, value) in [
            ("street", &self.street),
            ("province", &self.province),
            ("post_code", &self.post_code),
            ("country", &self.country),
        ] {
            if value.chars().count() > MAX_FIELD_LEN {
                return Err(ValidationError::TooLong {
                    field,
                    max: MAX_FIELD_LEN,
                });
            }
        }
        non_negative("cost_per_night", self.cost_per_night)?;
        non_negative("parking_spaces", self.parking_spaces)?;
        non_negative("number_of_bathrooms", self.number_of_bathrooms)?;
        non_negative("number_of_bedrooms", self.number_of_bedrooms)?;
        Ok(())
    }

    /// Attach an id, producing the stored record.
    pub fn into_property(self, id: i32) -> Property {
        Property {
            id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            thumbnail_photo_url: self.thumbnail_photo_url,
            cover_photo_url: self.cover_photo_url,
            cost_per_night: self.cost_per_night,
            street: self.street,
            city: self.city,
            province: self.province,
            post_code: self.post_code,
            country: self.country,
            parking_spaces: self.parking_spaces,
            number_of_bathrooms: self.number_of_bathrooms,
            number_of_bedrooms: self.number_of_bedrooms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NewProperty {
        serde_json::from_value(json!({
            "owner_id": 2,
            "title": "Speed lamp",
            "description": "description",
            "thumbnail_photo_url": "https://images.example.com/1.jpg",
            "cover_photo_url": "https://images.example.com/1-cover.jpg",
            "cost_per_night": 5000,
            "street": "536 Namsub Highway",
            "city": "Sotboske",
            "province": "Quebec",
            "post_code": "28142",
            "country": "Canada",
            "parking_spaces": 2,
            "number_of_bathrooms": 2,
            "number_of_bedrooms": 2
        }))
        .unwrap()
    }

    #[test]
    fn valid_property() {
        let property = sample();
        assert!(property.validate().is_ok());
        let stored = property.into_property(11);
        assert_eq!(stored.id, 11);
        assert_eq!(stored.cost_per_night, 5000);
    }

    #[test]
    fn optional_fields_default() {
        let property: NewProperty = serde_json::from_value(json!({
            "owner_id": 1,
            "title": "Cabin",
            "cost_per_night": 900,
            "city": "Banff"
        }))
        .unwrap();
        assert!(property.validate().is_ok());
        assert_eq!(property.parking_spaces, 0);
        assert!(property.street.is_empty());
    }

    #[test]
    fn rejects_negative_cost() {
        let mut property = sample();
        property.cost_per_night = -1;
        assert_eq!(
            property.validate(),
            Err(ValidationError::Negative {
                field: "cost_per_night"
            })
        );
    }

    #[test]
    fn rejects_missing_city() {
        let mut property = sample();
        property.city = " ".into();
        assert_eq!(
            property.validate(),
            Err(ValidationError::Empty { field: "city" })
        );
    }

    #[test]
    fn listing_serializes_flat() {
        let listing = PropertyListing {
            property: sample().into_property(3),
            average_rating: Some(4.5),
        };
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["city"], "Sotboske");
        assert_eq!(value["average_rating"], 4.5);
    }
}

//! Listing search query builder
//!
//! Folds the present filter options into a finished `(sql, params)` pair.
//! Placeholders are numbered in the order predicates are appended, so the
//! Nth `$n` always refers to the Nth entry of [`SearchQuery::params`] and
//! the limit is always the final parameter.

use serde::{Deserialize, Serialize};

use crate::models::Property;

/// Default number of rows returned by list operations
pub const DEFAULT_LIMIT: u32 = 10;

const SELECT: &str = "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating\n\
                      FROM properties\n\
                      LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Optional search criteria; absent fields apply no filter.
///
/// Prices are in the same unit as `cost_per_night`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Case-insensitive substring of the city name
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    pub minimum_price_per_night: Option<i32>,
    pub maximum_price_per_night: Option<i32>,
    /// Minimum average review score
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    /// City filter with blank input treated as absent.
    fn city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// True when no option would add a predicate.
    pub(crate) fn is_empty(&self) -> bool {
        self.city().is_none()
            && self.owner_id.is_none()
            && self.minimum_price_per_night.is_none()
            && self.maximum_price_per_night.is_none()
            && self.minimum_rating.is_none()
    }

    /// Evaluate the row-level predicates against a property.
    ///
    /// Mirrors the WHERE clause; the rating threshold is checked
    /// separately by [`PropertyFilter::matches_rating`].
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(city) = self.city() {
            if !property
                .city
                .to_lowercase()
                .contains(&city.to_lowercase())
            {
                return false;
            }
        }
        if let Some(owner_id) = self.owner_id {
            if property.owner_id != owner_id {
                return false;
            }
        }
        if let Some(min) = self.minimum_price_per_night {
            if property.cost_per_night < min {
                return false;
            }
        }
        if let Some(max) = self.maximum_price_per_night {
            if property.cost_per_night > max {
                return false;
            }
        }
        true
    }

    /// Mirrors the HAVING clause: an unreviewed property never passes a
    /// rating threshold.
    pub fn matches_rating(&self, average_rating: Option<f64>) -> bool {
        match self.minimum_rating {
            Some(min) => average_rating.is_some_and(|avg| avg >= min),
            None => true,
        }
    }
}

/// A value bound to one positional placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParam {
    Text(String),
    Int(i32),
    Float(f64),
    Limit(i64),
}

/// Finished search statement and its ordered parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    sql: String,
    params: Vec<SearchParam>,
}

impl SearchQuery {
    /// Build the listing search for `filter`, capped at `limit` rows.
    pub fn build(filter: &PropertyFilter, limit: u32) -> Self {
        let row_predicates = [
            filter.city().map(|city| {
                (
                    "properties.city ILIKE",
                    SearchParam::Text(format!("%{}%", escape_like(city))),
                )
            }),
            filter
                .owner_id
                .map(|id| ("properties.owner_id =", SearchParam::Int(id))),
            filter
                .minimum_price_per_night
                .map(|min| ("properties.cost_per_night >=", SearchParam::Int(min))),
            filter
                .maximum_price_per_night
                .map(|max| ("properties.cost_per_night <=", SearchParam::Int(max))),
        ];

        let (clauses, params) = row_predicates.into_iter().flatten().fold(
            (Vec::new(), Vec::new()),
            |(clauses, params), (lhs, param)| push_predicate(clauses, params, lhs, param),
        );

        let mut sql = String::from(SELECT);
        if !clauses.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str("\nGROUP BY properties.id");

        let mut params = match filter.minimum_rating {
            Some(min) => {
                let (having, params) = push_predicate(
                    Vec::new(),
                    params,
                    "avg(property_reviews.rating) >=",
                    SearchParam::Float(min),
                );
                sql.push_str("\nHAVING ");
                sql.push_str(&having.concat());
                params
            }
            None => params,
        };

        params.push(SearchParam::Limit(i64::from(limit)));
        sql.push_str("\nORDER BY properties.cost_per_night ASC, properties.id ASC");
        sql.push_str(&format!("\nLIMIT ${}", params.len()));

        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SearchParam] {
        &self.params
    }
}

/// Append `param` and render `lhs $n` with `n` the new parameter count.
fn push_predicate(
    mut clauses: Vec<String>,
    mut params: Vec<SearchParam>,
    lhs: &str,
    param: SearchParam,
) -> (Vec<String>, Vec<SearchParam>) {
    params.push(param);
    clauses.push(format!("{} ${}", lhs, params.len()));
    (clauses, params)
}

/// Escape LIKE metacharacters so the value matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(city: &str, owner_id: i32, cost: i32) -> Property {
        Property {
            id: 1,
            owner_id,
            title: "t".into(),
            description: String::new(),
            thumbnail_photo_url: String::new(),
            cover_photo_url: String::new(),
            cost_per_night: cost,
            street: String::new(),
            city: city.into(),
            province: String::new(),
            post_code: String::new(),
            country: String::new(),
            parking_spaces: 0,
            number_of_bathrooms: 0,
            number_of_bedrooms: 0,
        }
    }

    #[test]
    fn no_options_only_binds_limit() {
        let query = SearchQuery::build(&PropertyFilter::default(), 10);
        assert_eq!(query.params(), &[SearchParam::Limit(10)]);
        assert!(!query.sql().contains("WHERE"));
        assert!(!query.sql().contains("HAVING"));
        assert!(query.sql().ends_with(
            "ORDER BY properties.cost_per_night ASC, properties.id ASC\nLIMIT $1"
        ));
    }

    #[test]
    fn full_filter_statement() {
        let filter = PropertyFilter {
            city: Some("van".into()),
            owner_id: None,
            minimum_price_per_night: Some(1000),
            maximum_price_per_night: Some(3000),
            minimum_rating: Some(4.0),
        };
        let query = SearchQuery::build(&filter, 5);

        assert_eq!(
            query.sql(),
            "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating\n\
             FROM properties\n\
             LEFT JOIN property_reviews ON properties.id = property_reviews.property_id\n\
             WHERE properties.city ILIKE $1 AND properties.cost_per_night >= $2 \
             AND properties.cost_per_night <= $3\n\
             GROUP BY properties.id\n\
             HAVING avg(property_reviews.rating) >= $4\n\
             ORDER BY properties.cost_per_night ASC, properties.id ASC\n\
             LIMIT $5"
        );
        assert_eq!(
            query.params(),
            &[
                SearchParam::Text("%van%".into()),
                SearchParam::Int(1000),
                SearchParam::Int(3000),
                SearchParam::Float(4.0),
                SearchParam::Limit(5),
            ]
        );
    }

    #[test]
    fn owner_only() {
        let filter = PropertyFilter {
            owner_id: Some(7),
            ..Default::default()
        };
        let query = SearchQuery::build(&filter, 10);
        assert!(query
            .sql()
            .contains("WHERE properties.owner_id = $1\nGROUP BY"));
        assert_eq!(
            query.params(),
            &[SearchParam::Int(7), SearchParam::Limit(10)]
        );
    }

    #[test]
    fn rating_only_goes_after_group_by() {
        let filter = PropertyFilter {
            minimum_rating: Some(3.5),
            ..Default::default()
        };
        let query = SearchQuery::build(&filter, 2);
        let sql = query.sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.find("GROUP BY").unwrap() < sql.find("HAVING").unwrap());
        assert!(sql.contains("HAVING avg(property_reviews.rating) >= $1"));
        assert_eq!(
            query.params(),
            &[SearchParam::Float(3.5), SearchParam::Limit(2)]
        );
    }

    #[test]
    fn blank_city_is_absent() {
        let filter = PropertyFilter {
            city: Some("  ".into()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(SearchQuery::build(&filter, 10).params().len(), 1);
    }

    #[test]
    fn city_wildcards_escaped() {
        let filter = PropertyFilter {
            city: Some("50%_off\\".into()),
            ..Default::default()
        };
        let query = SearchQuery::build(&filter, 10);
        assert_eq!(
            query.params()[0],
            SearchParam::Text("%50\\%\\_off\\\\%".into())
        );
    }

    #[test]
    fn row_predicates_match_in_memory() {
        let filter = PropertyFilter {
            city: Some("VAN".into()),
            minimum_price_per_night: Some(1000),
            maximum_price_per_night: Some(3000),
            ..Default::default()
        };
        assert!(filter.matches(&property("Vancouver", 1, 1000)));
        assert!(filter.matches(&property("North Vancouver", 1, 3000)));
        assert!(!filter.matches(&property("Vancouver", 1, 3001)));
        assert!(!filter.matches(&property("Victoria", 1, 2000)));

        let by_owner = PropertyFilter {
            owner_id: Some(2),
            ..Default::default()
        };
        assert!(by_owner.matches(&property("x", 2, 1)));
        assert!(!by_owner.matches(&property("x", 3, 1)));
    }

    #[test]
    fn rating_threshold_excludes_unreviewed() {
        let filter = PropertyFilter {
            minimum_rating: Some(4.0),
            ..Default::default()
        };
        assert!(filter.matches_rating(Some(4.0)));
        assert!(!filter.matches_rating(Some(3.99)));
        assert!(!filter.matches_rating(None));
        assert!(PropertyFilter::default().matches_rating(None));
    }
}

//! Retail partners and the domestic/international split.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ImageId, RetailerId};
use super::validation::{ValidationError, is_blank};

/// Country whose retailers are listed as domestic.
pub const DOMESTIC_COUNTRY: &str = "Serbia";

/// A retail partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retailer {
    pub id: RetailerId,
    pub name: String,
    /// Store format, e.g. "Supermarket Chain".
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-text footprint, e.g. "100+ stores".
    pub locations: String,
    pub country: String,
    pub logo_id: Option<ImageId>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Retailer {
    #[must_use]
    pub fn is_domestic(&self) -> bool {
        self.country == DOMESTIC_COUNTRY
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRetailer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub locations: String,
    pub country: String,
    pub logo_id: Option<ImageId>,
    pub display_order: i32,
    pub is_active: bool,
}

impl NewRetailer {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any of name, type, locations or
    /// country is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, &self.kind, &self.locations, &self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailerChanges {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub locations: String,
    pub country: String,
    pub logo_id: Option<ImageId>,
    pub is_active: bool,
}

impl RetailerChanges {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any of name, type, locations or
    /// country is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, &self.kind, &self.locations, &self.country)
    }
}

impl From<&Retailer> for RetailerChanges {
    fn from(retailer: &Retailer) -> Self {
        Self {
            name: retailer.name.clone(),
            kind: retailer.kind.clone(),
            locations: retailer.locations.clone(),
            country: retailer.country.clone(),
            logo_id: retailer.logo_id,
            is_active: retailer.is_active,
        }
    }
}

fn validate_fields(
    name: &str,
    kind: &str,
    locations: &str,
    country: &str,
) -> Result<(), ValidationError> {
    if [name, kind, locations, country].into_iter().any(is_blank) {
        return Err(ValidationError::new("All fields are required"));
    }
    Ok(())
}

/// Active retailers split by country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetailerPartition {
    pub domestic: Vec<Retailer>,
    pub international: Vec<Retailer>,
}

/// Split the active retailers into domestic and international, keeping input order.
///
/// Inactive retailers are dropped; every active retailer lands on exactly one side.
#[must_use]
pub fn partition_retailers(retailers: impl IntoIterator<Item = Retailer>) -> RetailerPartition {
    let (domestic, international) = retailers
        .into_iter()
        .filter(|retailer| retailer.is_active)
        .partition(Retailer::is_domestic);
    RetailerPartition {
        domestic,
        international,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retailer(name: &str, country: &str, is_active: bool) -> Retailer {
        let now = Utc::now();
        Retailer {
            id: RetailerId::generate(),
            name: name.to_owned(),
            kind: "Supermarket Chain".to_owned(),
            locations: "10+ stores".to_owned(),
            country: country.to_owned(),
            logo_id: None,
            display_order: 0,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let input = vec![
            retailer("Idea", "Serbia", true),
            retailer("Konzum", "Croatia", true),
            retailer("Maxi", "Serbia", true),
            retailer("Mercator", "Slovenia", true),
        ];
        let split = partition_retailers(input.clone());

        assert_eq!(split.domestic.len() + split.international.len(), input.len());
        assert!(split.domestic.iter().all(Retailer::is_domestic));
        assert!(split.international.iter().all(|r| !r.is_domestic()));
        let names: Vec<_> = split.domestic.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Idea", "Maxi"]);
    }

    #[test]
    fn test_partition_drops_inactive() {
        let split = partition_retailers(vec![
            retailer("Idea", "Serbia", false),
            retailer("Konzum", "Croatia", false),
        ]);
        assert_eq!(split, RetailerPartition::default());
    }

    #[test]
    fn test_country_match_is_exact() {
        let split = partition_retailers(vec![retailer("Tempo", "serbia", true)]);
        assert!(split.domestic.is_empty());
        assert_eq!(split.international.len(), 1);
    }

    #[test]
    fn test_new_retailer_requires_all_fields() {
        let mut new = NewRetailer {
            name: "Gomex".to_owned(),
            kind: "Supermarket Chain".to_owned(),
            locations: String::new(),
            country: "Serbia".to_owned(),
            logo_id: None,
            display_order: 0,
            is_active: true,
        };
        assert_eq!(
            new.validate(),
            Err(ValidationError::new("All fields are required"))
        );
        new.locations = "150+ stores".to_owned();
        assert!(new.validate().is_ok());
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let json = serde_json::to_value(retailer("DIS", "Serbia", true)).unwrap();
        assert_eq!(json["type"], "Supermarket Chain");
    }
}

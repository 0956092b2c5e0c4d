use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LocatorError;
use crate::geo::LatLng;

pub type StoreId = i64;
pub type BrandId = i64;

/// A store as returned by the store endpoints.
///
/// `lat`/`lon` decode leniently: the backend occasionally sends strings or
/// nulls for stores that were never geocoded, and those must not fail the
/// whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub brand_id: BrandId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Store {
    /// Map position, or `NoCoordinates` when either axis is missing.
    pub fn position(&self) -> Result<LatLng, LocatorError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(LatLng::new(lat, lon)),
            _ => Err(LocatorError::NoCoordinates { store_id: self.id }),
        }
    }

    pub fn in_categories(&self, active: &std::collections::BTreeSet<String>) -> bool {
        active.is_empty()
            || self
                .category
                .as_deref()
                .is_some_and(|c| active.contains(c))
    }
}

/// A brand menu item, already scoped by the nutrient filters server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carb: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn lenient_coord<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_store_deserializes_numeric_coords() {
        let json = r#"{"id":1,"brandId":7,"name":"Starbucks Seolleung","lat":37.504,"lon":127.048,"category":"cafe"}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.brand_id, 7);
        assert_eq!(store.position().unwrap(), LatLng::new(37.504, 127.048));
        assert_eq!(store.category.as_deref(), Some("cafe"));
        assert!(store.address.is_none());
    }

    #[test]
    fn test_store_string_coord_becomes_absent() {
        let json = r#"{"id":2,"brandId":7,"name":"Broken","lat":"x","lon":2}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert!(store.lat.is_none());
        assert_eq!(store.lon, Some(2.0));
        assert_eq!(
            store.position(),
            Err(LocatorError::NoCoordinates { store_id: 2 })
        );
    }

    #[test]
    fn test_store_null_and_missing_coords() {
        let json = r#"{"id":3,"brandId":1,"name":"Nowhere","lat":null}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert!(store.lat.is_none());
        assert!(store.lon.is_none());
        assert!(store.position().is_err());
    }

    #[test]
    fn test_in_categories_empty_set_allows_all() {
        let store = Store {
            id: 1,
            brand_id: 1,
            name: "A".to_string(),
            lat: None,
            lon: None,
            category: None,
            address: None,
        };
        assert!(store.in_categories(&BTreeSet::new()));

        let active: BTreeSet<String> = ["cafe".to_string()].into();
        assert!(!store.in_categories(&active));
    }

    #[test]
    fn test_menu_deserializes_partial_nutrients() {
        let json = r#"{"id":10,"name":"Americano","calories":10.0,"protein":null}"#;
        let menu: Menu = serde_json::from_str(json).unwrap();
        assert_eq!(menu.name, "Americano");
        assert_eq!(menu.calories, Some(10.0));
        assert!(menu.protein.is_none());
        assert!(menu.image_url.is_none());
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::{field_name, FilterState, Nutrient, Side};
use crate::geo::LatLng;

/// Request body for the filtered store and menu endpoints.
///
/// Fields whose source value is undefined are omitted entirely; the backend
/// reads a missing `categories` as "no restriction", which an empty array
/// would not mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(flatten)]
    pub nutrients: BTreeMap<String, String>,
    pub center_lat: f64,
    pub center_lon: f64,
}

impl QueryPayload {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lon)
    }

    /// The menu endpoint takes nutrient bounds and center only.
    pub fn for_menus(&self) -> QueryPayload {
        QueryPayload {
            categories: None,
            ..self.clone()
        }
    }
}

pub fn build(filters: &FilterState, center: LatLng) -> QueryPayload {
    let categories = if filters.categories.is_empty() {
        None
    } else {
        Some(filters.categories.iter().cloned().collect())
    };

    let mut nutrients = BTreeMap::new();
    for nutrient in Nutrient::ALL {
        for side in [Side::Min, Side::Max] {
            if let Some(value) = filters.resolve(nutrient, side) {
                nutrients.insert(field_name(nutrient, side), value.to_string());
            }
        }
    }

    QueryPayload {
        categories,
        nutrients,
        center_lat: center.lat,
        center_lon: center.lon,
    }
}

/// Explicit request center, then the last pending viewport center, then the default.
pub fn resolve_center(
    explicit: Option<LatLng>,
    pending: Option<LatLng>,
    default: LatLng,
) -> LatLng {
    explicit.or(pending).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEOLLEUNG: LatLng = LatLng::new(37.504, 127.048);

    #[test]
    fn test_empty_filters_produce_center_only() {
        let payload = build(&FilterState::new(), SEOLLEUNG);
        let json = serde_json::to_value(&payload).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(json["centerLat"], 37.504);
        assert_eq!(json["centerLon"], 127.048);
    }

    #[test]
    fn test_no_active_categories_omits_field() {
        let mut f = FilterState::new();
        f.set_bound(Nutrient::Calories, Side::Max, "500");
        let json = serde_json::to_value(build(&f, SEOLLEUNG)).unwrap();
        assert!(json.get("categories").is_none());
        assert_eq!(json["caloriesMax"], "500");
    }

    #[test]
    fn test_active_categories_are_sorted() {
        let mut f = FilterState::new();
        f.toggle_category("restaurant");
        f.toggle_category("cafe");
        let json = serde_json::to_value(build(&f, SEOLLEUNG)).unwrap();
        assert_eq!(json["categories"], serde_json::json!(["cafe", "restaurant"]));
    }

    #[test]
    fn test_undefined_nutrients_are_omitted() {
        let mut f = FilterState::new();
        f.set_bound(Nutrient::Protein, Side::Min, "20");
        let json = serde_json::to_value(build(&f, SEOLLEUNG)).unwrap();
        assert_eq!(json["proteinMin"], "20");
        for key in [
            "proteinMax",
            "caloriesMin",
            "caloriesMax",
            "fatMin",
            "fatMax",
            "carbMin",
            "carbMax",
        ] {
            assert!(json.get(key).is_none(), "{key} should be omitted");
        }
    }

    #[test]
    fn test_flat_field_overrides_range() {
        let mut f = FilterState::new();
        f.set_bound(Nutrient::Fat, Side::Min, "5");
        f.set_flat(Nutrient::Fat, Side::Min, "8");
        f.set_flat(Nutrient::Carb, Side::Max, "40");
        let payload = build(&f, SEOLLEUNG);
        assert_eq!(payload.nutrients["fatMin"], "8");
        assert_eq!(payload.nutrients["carbMax"], "40");
        assert_eq!(payload.nutrients.len(), 2);
    }

    #[test]
    fn test_invalid_numbers_pass_through() {
        let mut f = FilterState::new();
        f.set_bound(Nutrient::Calories, Side::Min, "abc");
        f.set_bound(Nutrient::Calories, Side::Max, "100");
        f.set_bound(Nutrient::Protein, Side::Min, "900");
        f.set_bound(Nutrient::Protein, Side::Max, "1");
        let payload = build(&f, SEOLLEUNG);
        assert_eq!(payload.nutrients["caloriesMin"], "abc");
        assert_eq!(payload.nutrients["proteinMin"], "900");
        assert_eq!(payload.nutrients["proteinMax"], "1");
    }

    #[test]
    fn test_for_menus_drops_categories_only() {
        let mut f = FilterState::sidebar_defaults();
        f.set_bound(Nutrient::Carb, Side::Max, "60");
        let payload = build(&f, LatLng::new(1.0, 2.0));
        let menus = payload.for_menus();
        assert!(menus.categories.is_none());
        assert_eq!(menus.nutrients, payload.nutrients);
        assert_eq!(menus.center(), LatLng::new(1.0, 2.0));
    }

    #[test]
    fn test_resolve_center_prefers_pending_over_default() {
        let got = resolve_center(
            None,
            Some(LatLng::new(10.0, 20.0)),
            LatLng::new(37.5, 127.0),
        );
        assert_eq!(got, LatLng::new(10.0, 20.0));
    }

    #[test]
    fn test_resolve_center_falls_back_to_default() {
        let got = resolve_center(None, None, LatLng::new(37.5, 127.0));
        assert_eq!(got, LatLng::new(37.5, 127.0));
    }

    #[test]
    fn test_resolve_center_explicit_wins() {
        let got = resolve_center(
            Some(LatLng::new(1.0, 1.0)),
            Some(LatLng::new(10.0, 20.0)),
            LatLng::new(37.5, 127.0),
        );
        assert_eq!(got, LatLng::new(1.0, 1.0));
    }
}

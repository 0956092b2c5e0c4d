use std::collections::{BTreeMap, BTreeSet};

/// Category tags offered by the sidebar, with their display labels.
pub const CATEGORIES: [(&str, &str); 2] = [("cafe", "Cafe"), ("restaurant", "Restaurant")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carb,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carb,
    ];

    /// Wire key, also the prefix of the flat payload fields.
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carb => "carb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Fat => "Fat",
            Nutrient::Carb => "Carbs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Min,
    Max,
}

impl Side {
    pub fn suffix(self) -> &'static str {
        match self {
            Side::Min => "Min",
            Side::Max => "Max",
        }
    }
}

/// Flat payload field name, e.g. `caloriesMin`.
pub fn field_name(nutrient: Nutrient, side: Side) -> String {
    format!("{}{}", nutrient.key(), side.suffix())
}

/// Both ends optional. Values stay as typed; `min > max` is not rejected here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutrientRange {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl NutrientRange {
    pub fn new(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min: min.and_then(normalize_input),
            max: max.and_then(normalize_input),
        }
    }

    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Min => self.min.as_deref(),
            Side::Max => self.max.as_deref(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub categories: BTreeSet<String>,
    pub ranges: BTreeMap<Nutrient, NutrientRange>,
    pub flat: BTreeMap<(Nutrient, Side), String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial sidebar state: every category checked, no ranges.
    pub fn sidebar_defaults() -> Self {
        Self {
            categories: CATEGORIES.iter().map(|(k, _)| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn toggle_category(&mut self, key: &str) {
        if !self.categories.remove(key) {
            self.categories.insert(key.to_string());
        }
    }

    pub fn is_category_active(&self, key: &str) -> bool {
        self.categories.contains(key)
    }

    /// Set one end of a range from raw input; blank input clears it.
    pub fn set_bound(&mut self, nutrient: Nutrient, side: Side, raw: &str) {
        let value = normalize_input(raw);
        let range = self.ranges.entry(nutrient).or_default();
        match side {
            Side::Min => range.min = value,
            Side::Max => range.max = value,
        }
        if range.is_unbounded() {
            self.ranges.remove(&nutrient);
        }
    }

    pub fn set_flat(&mut self, nutrient: Nutrient, side: Side, raw: &str) {
        match normalize_input(raw) {
            Some(v) => {
                self.flat.insert((nutrient, side), v);
            }
            None => {
                self.flat.remove(&(nutrient, side));
            }
        }
    }

    /// Range bound as currently typed, for populating input fields.
    pub fn bound(&self, nutrient: Nutrient, side: Side) -> &str {
        self.ranges
            .get(&nutrient)
            .and_then(|r| r.get(side))
            .unwrap_or("")
    }

    /// Effective value for one payload field: the flat field wins over the range.
    pub fn resolve(&self, nutrient: Nutrient, side: Side) -> Option<&str> {
        self.flat
            .get(&(nutrient, side))
            .map(String::as_str)
            .or_else(|| self.ranges.get(&nutrient).and_then(|r| r.get(side)))
    }
}

fn normalize_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

use std::collections::BTreeSet;

use crate::config::ViewConfig;
use crate::geo::{clamp_level, Bounds, LatLng};
use crate::map_sdk::{MapSdk, MarkerIcon, LABEL_ANCHOR};
use crate::models::{Store, StoreId};

const CAFE_ICON: MarkerIcon = MarkerIcon {
    color: "#8b5e3c",
    glyph: "C",
};
const RESTAURANT_ICON: MarkerIcon = MarkerIcon {
    color: "#e8590c",
    glyph: "R",
};
const OTHER_ICON: MarkerIcon = MarkerIcon {
    color: "#495057",
    glyph: "S",
};

pub fn marker_icon(category: Option<&str>) -> MarkerIcon {
    match category {
        Some("cafe") => CAFE_ICON,
        Some("restaurant") => RESTAURANT_ICON,
        _ => OTHER_ICON,
    }
}

/// How the view should be framed after a replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewOptions {
    /// `None` for organic loads (frame the results); `Some` for
    /// "search here" (keep the requested point centered).
    pub center: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced { markers: usize },
    /// Nothing markable; the previous generation stays on the map.
    Empty,
}

struct Placed<M: MapSdk> {
    store: Store,
    marker: M::Marker,
    label: M::Overlay,
}

/// Owns every marker and label overlay on the map. A replacement swaps the
/// whole generation at once; there is no incremental diffing.
pub struct MarkerSetManager<M: MapSdk> {
    placed: Vec<Placed<M>>,
}

impl<M: MapSdk> Default for MarkerSetManager<M> {
    fn default() -> Self {
        Self { placed: Vec::new() }
    }
}

impl<M: MapSdk> MarkerSetManager<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn store(&self, id: StoreId) -> Option<&Store> {
        self.placed.iter().map(|p| &p.store).find(|s| s.id == id)
    }

    pub fn store_ids(&self) -> Vec<StoreId> {
        self.placed.iter().map(|p| p.store.id).collect()
    }

    pub fn replace(
        &mut self,
        map: &mut M,
        stores: &[Store],
        active_categories: &BTreeSet<String>,
        options: ViewOptions,
        view: &ViewConfig,
    ) -> ReplaceOutcome {
        let markable: Vec<(&Store, LatLng)> = stores
            .iter()
            .filter(|s| s.in_categories(active_categories))
            .filter_map(|s| match s.position() {
                Ok(p) => Some((s, p)),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping store without coordinates");
                    None
                }
            })
            .collect();

        if markable.is_empty() {
            tracing::debug!(
                received = stores.len(),
                kept = self.placed.len(),
                "No markable stores, keeping current markers"
            );
            return ReplaceOutcome::Empty;
        }

        self.clear(map);

        let mut bounds = Bounds::new();
        for (store, pos) in markable {
            let marker = map.create_marker(pos, marker_icon(store.category.as_deref()), store.id);
            let label = map.create_overlay(pos, &store.name, LABEL_ANCHOR, store.id);
            bounds.extend(pos);
            self.placed.push(Placed {
                store: store.clone(),
                marker,
                label,
            });
        }

        frame(map, &bounds, options, view);

        tracing::info!(markers = self.placed.len(), "Replaced store markers");
        ReplaceOutcome::Replaced {
            markers: self.placed.len(),
        }
    }

    /// Remove every marker and label of the current generation.
    pub fn clear(&mut self, map: &mut M) {
        for placed in self.placed.drain(..) {
            map.remove_marker(placed.marker);
            map.remove_overlay(placed.label);
        }
    }
}

/// Fit to the bounds, clamp the fitted level, then recenter if asked.
fn frame<M: MapSdk>(map: &mut M, bounds: &Bounds, options: ViewOptions, view: &ViewConfig) {
    map.fit_bounds(bounds, view.fit_padding_px);
    let fitted = map.level();
    let clamped = clamp_level(fitted, view.min_level, view.max_level);
    if clamped != fitted {
        map.set_level(clamped);
    }
    if let Some(center) = options.center {
        map.set_center(center);
    }
}

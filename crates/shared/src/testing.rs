//! Recording `MapSdk` used by the unit tests.

use std::collections::BTreeMap;

use crate::geo::{Bounds, LatLng};
use crate::map_sdk::{Anchor, MapSdk, MarkerIcon};
use crate::models::{Store, StoreId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeHandle(pub u64);

#[derive(Debug)]
pub struct FakeMap {
    pub center: LatLng,
    pub level: u8,
    /// Level the fake lands on after `fit_bounds`, standing in for the SDK's own fit.
    pub fit_level: u8,
    pub markers: BTreeMap<u64, (StoreId, LatLng, MarkerIcon)>,
    pub overlays: BTreeMap<u64, (StoreId, String, Anchor)>,
    pub fit_calls: Vec<(Bounds, u32)>,
    next_handle: u64,
}

impl FakeMap {
    pub fn new(center: LatLng, level: u8) -> Self {
        Self {
            center,
            level,
            fit_level: level,
            markers: BTreeMap::new(),
            overlays: BTreeMap::new(),
            fit_calls: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn marker_store_ids(&self) -> Vec<StoreId> {
        self.markers.values().map(|(id, _, _)| *id).collect()
    }

    fn handle(&mut self) -> FakeHandle {
        self.next_handle += 1;
        FakeHandle(self.next_handle)
    }
}

impl MapSdk for FakeMap {
    type Marker = FakeHandle;
    type Overlay = FakeHandle;

    fn create_marker(&mut self, position: LatLng, icon: MarkerIcon, store_id: StoreId) -> FakeHandle {
        let h = self.handle();
        self.markers.insert(h.0, (store_id, position, icon));
        h
    }

    fn create_overlay(
        &mut self,
        _position: LatLng,
        text: &str,
        anchor: Anchor,
        store_id: StoreId,
    ) -> FakeHandle {
        let h = self.handle();
        self.overlays.insert(h.0, (store_id, text.to_string(), anchor));
        h
    }

    fn remove_marker(&mut self, marker: FakeHandle) {
        self.markers.remove(&marker.0);
    }

    fn remove_overlay(&mut self, overlay: FakeHandle) {
        self.overlays.remove(&overlay.0);
    }

    fn fit_bounds(&mut self, bounds: &Bounds, padding_px: u32) {
        self.fit_calls.push((*bounds, padding_px));
        if let Some(c) = bounds.center() {
            self.center = c;
        }
        self.level = self.fit_level;
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn level(&self) -> u8 {
        self.level
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    fn set_level(&mut self, level: u8) {
        self.level = level;
    }
}

pub fn store(id: StoreId, lat: f64, lon: f64, category: &str) -> Store {
    Store {
        id,
        brand_id: id * 10,
        name: format!("Store {id}"),
        lat: Some(lat),
        lon: Some(lon),
        category: Some(category.to_string()),
        address: None,
    }
}

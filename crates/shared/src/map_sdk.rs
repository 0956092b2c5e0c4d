//! Capability interface over the map rendering engine.
//!
//! The core never talks to a concrete SDK. Loading the SDK, creating the
//! map and registering drag/zoom listeners happen in the platform binding,
//! which reports back through [`MapEvent`].

use crate::geo::{Bounds, LatLng};
use crate::models::StoreId;

/// Marker appearance, derived from the store category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub color: &'static str,
    pub glyph: &'static str,
}

/// Overlay anchor as a fraction of the overlay box. `y` above 1.0 lifts the
/// overlay above its position, which is how labels sit on top of markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Name label drawn above a store marker.
pub const LABEL_ANCHOR: Anchor = Anchor { x: 0.5, y: 2.4 };

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A pan or zoom finished.
    ViewportChanged { center: LatLng, level: u8 },
    /// A store marker or its label was clicked.
    StoreActivated(StoreId),
}

pub trait MapSdk {
    type Marker;
    type Overlay;

    /// Place a marker on the map. Clicking it must raise
    /// [`MapEvent::StoreActivated`] for `store_id`.
    fn create_marker(&mut self, position: LatLng, icon: MarkerIcon, store_id: StoreId)
        -> Self::Marker;

    /// Place a text overlay on the map. Clicking it must raise
    /// [`MapEvent::StoreActivated`] for `store_id`.
    fn create_overlay(
        &mut self,
        position: LatLng,
        text: &str,
        anchor: Anchor,
        store_id: StoreId,
    ) -> Self::Overlay;

    fn remove_marker(&mut self, marker: Self::Marker);

    fn remove_overlay(&mut self, overlay: Self::Overlay);

    fn fit_bounds(&mut self, bounds: &Bounds, padding_px: u32);

    fn center(&self) -> LatLng;

    fn level(&self) -> u8;

    fn set_center(&mut self, center: LatLng);

    fn set_level(&mut self, level: u8);
}

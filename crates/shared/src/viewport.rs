use crate::config::ViewConfig;
use crate::geo::{clamp_level, LatLng};
use crate::map_sdk::MapSdk;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub center: LatLng,
    pub level: u8,
    /// The user panned or zoomed since the last search.
    pub dirty: bool,
}

/// Owns the map handle and tracks where the user is looking.
///
/// Panning never fetches; only an explicit "search here" turns the current
/// viewport into a query.
pub struct MapViewportController<M: MapSdk> {
    map: M,
    state: ViewportState,
    pending_center: Option<LatLng>,
    min_level: u8,
    max_level: u8,
}

impl<M: MapSdk> MapViewportController<M> {
    pub fn new(map: M, view: &ViewConfig) -> Self {
        let state = ViewportState {
            center: map.center(),
            level: map.level(),
            dirty: false,
        };
        Self {
            map,
            state,
            pending_center: None,
            min_level: view.min_level,
            max_level: view.max_level,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    /// Last center reported by a pan or zoom.
    pub fn pending_center(&self) -> Option<LatLng> {
        self.pending_center
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn into_map(self) -> M {
        self.map
    }

    pub fn on_viewport_changed(&mut self, center: LatLng, level: u8) -> ViewportState {
        self.state = ViewportState {
            center,
            level,
            dirty: true,
        };
        self.pending_center = Some(center);
        self.state
    }

    /// Clamp the zoom, recenter on `center`, and return the point to search at.
    /// The caller issues the fetch and then calls [`Self::mark_searched`].
    pub fn request_search_here(&mut self, center: LatLng) -> LatLng {
        let level = self.map.level();
        let clamped = clamp_level(level, self.min_level, self.max_level);
        if clamped != level {
            tracing::debug!(from = level, to = clamped, "Clamping zoom for search here");
            self.map.set_level(clamped);
        }
        self.map.set_center(center);
        self.state.center = center;
        self.state.level = clamped;
        self.pending_center = Some(center);
        center
    }

    pub fn mark_searched(&mut self) {
        self.state.dirty = false;
    }

    /// Pull center and level back from the map after the view was framed programmatically.
    pub fn sync_from_map(&mut self) {
        self.state.center = self.map.center();
        self.state.level = self.map.level();
    }
}

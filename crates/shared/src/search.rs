//! Keeps the map, the active filters, the viewport and the bottom sheet in
//! step while fetches complete in any order.
//!
//! The orchestrator does no I/O. Each operation that needs the network
//! returns a request carrying a ticket; the caller performs the fetch and
//! hands the result back together with that ticket.

use std::collections::BTreeSet;

use crate::concern::{Accepted, Completion, Concern, Generation, Phase};
use crate::config::ViewConfig;
use crate::error::LocatorError;
use crate::filter::FilterState;
use crate::geo::LatLng;
use crate::map_sdk::{MapEvent, MapSdk};
use crate::markers::{MarkerSetManager, ReplaceOutcome, ViewOptions};
use crate::models::{BrandId, Menu, Store, StoreId};
use crate::query::{self, QueryPayload};
use crate::selection::{MenuTicket, SelectionController};
use crate::viewport::MapViewportController;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    /// Unfiltered `GET /api/v1/stores`, used for the first paint.
    All,
    Filtered(QueryPayload),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreTicket {
    generation: Generation,
    view: ViewOptions,
    filter_categories: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSearch {
    pub ticket: StoreTicket,
    pub request: StoreRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSearch {
    pub ticket: MenuTicket,
    pub brand_id: BrandId,
    pub payload: QueryPayload,
}

pub struct SearchOrchestrator<M: MapSdk> {
    view: ViewConfig,
    filters: FilterState,
    /// Center of the last filtered search.
    query_center: Option<LatLng>,
    viewport: MapViewportController<M>,
    markers: MarkerSetManager<M>,
    stores: Concern,
    selection: SelectionController,
    last_outcome: Option<ReplaceOutcome>,
}

impl<M: MapSdk> SearchOrchestrator<M> {
    pub fn new(map: M, view: ViewConfig) -> Self {
        Self {
            viewport: MapViewportController::new(map, &view),
            view,
            filters: FilterState::new(),
            query_center: None,
            markers: MarkerSetManager::new(),
            stores: Concern::new("stores"),
            selection: SelectionController::new(),
            last_outcome: None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn viewport(&self) -> &MapViewportController<M> {
        &self.viewport
    }

    pub fn markers(&self) -> &MarkerSetManager<M> {
        &self.markers
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn store_phase(&self) -> &Phase {
        self.stores.phase()
    }

    pub fn menu_phase(&self) -> &Phase {
        self.selection.phase()
    }

    /// Text for the indicator under the map, if any.
    pub fn status_message(&self) -> Option<String> {
        match self.stores.phase() {
            Phase::Loading => Some("Loading stores…".to_string()),
            Phase::Error(msg) => Some(msg.clone()),
            Phase::Ready if self.last_outcome == Some(ReplaceOutcome::Empty) => {
                Some("No stores match these filters.".to_string())
            }
            _ => None,
        }
    }

    pub fn initial_load(&mut self) -> StoreSearch {
        tracing::info!("Loading all stores");
        StoreSearch {
            ticket: self.begin_stores(ViewOptions::default(), false),
            request: StoreRequest::All,
        }
    }

    /// Explicit search with a new filter state, centered on wherever the
    /// user last left the map.
    pub fn apply_filters(&mut self, filters: FilterState) -> StoreSearch {
        self.filters = filters;
        let center = query::resolve_center(
            None,
            self.viewport.pending_center(),
            self.view.default_center,
        );
        self.filtered_search(center, ViewOptions::default())
    }

    /// "Search here": clamp the zoom, recenter, and query at `center`
    /// (the map's current center when `None`).
    pub fn search_here(&mut self, center: Option<LatLng>) -> StoreSearch {
        let requested = center.unwrap_or_else(|| self.viewport.map().center());
        let target = self.viewport.request_search_here(requested);
        let center = query::resolve_center(
            Some(target),
            self.viewport.pending_center(),
            self.view.default_center,
        );
        self.filtered_search(center, ViewOptions { center: Some(center) })
    }

    pub fn finish_store_search(
        &mut self,
        ticket: StoreTicket,
        result: Result<Vec<Store>, LocatorError>,
    ) -> Completion {
        match self.stores.accept(ticket.generation, result) {
            Accepted::Value(stores) => {
                let no_restriction = BTreeSet::new();
                let categories = if ticket.filter_categories {
                    &self.filters.categories
                } else {
                    &no_restriction
                };
                let outcome = self.markers.replace(
                    self.viewport.map_mut(),
                    &stores,
                    categories,
                    ticket.view,
                    &self.view,
                );
                self.viewport.sync_from_map();
                self.last_outcome = Some(outcome);
                Completion::Applied
            }
            Accepted::Failed => Completion::Failed,
            Accepted::Stale => Completion::Stale,
        }
    }

    pub fn handle_map_event(&mut self, event: MapEvent) -> Option<MenuSearch> {
        match event {
            MapEvent::ViewportChanged { center, level } => {
                self.viewport.on_viewport_changed(center, level);
                None
            }
            MapEvent::StoreActivated(id) => self.select_store(id),
        }
    }

    /// Select a store currently on the map and start loading its menus.
    pub fn select_store(&mut self, id: StoreId) -> Option<MenuSearch> {
        let Some(store) = self.markers.store(id).cloned() else {
            tracing::warn!(store_id = id, "Activated store is not on the map");
            return None;
        };
        let brand_id = store.brand_id;
        let ticket = self.selection.select(store);
        Some(self.menu_search(ticket, brand_id))
    }

    /// Reload menus for the current selection with the current filters.
    pub fn refresh_menus(&mut self) -> Option<MenuSearch> {
        let brand_id = self.selection.selected()?.brand_id;
        let ticket = self.selection.refresh()?;
        Some(self.menu_search(ticket, brand_id))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn finish_menu_search(
        &mut self,
        ticket: MenuTicket,
        result: Result<Vec<Menu>, LocatorError>,
    ) -> Completion {
        self.selection.complete(ticket, result)
    }

    /// Remove everything this orchestrator put on the map and hand the map back.
    pub fn teardown(mut self) -> M {
        self.markers.clear(self.viewport.map_mut());
        self.selection.clear();
        self.viewport.into_map()
    }

    fn begin_stores(&mut self, view: ViewOptions, filter_categories: bool) -> StoreTicket {
        StoreTicket {
            generation: self.stores.begin(),
            view,
            filter_categories,
        }
    }

    fn filtered_search(&mut self, center: LatLng, view: ViewOptions) -> StoreSearch {
        let payload = query::build(&self.filters, center);
        self.query_center = Some(center);
        let ticket = self.begin_stores(view, true);
        self.viewport.mark_searched();
        tracing::info!(
            lat = center.lat,
            lon = center.lon,
            categories = self.filters.categories.len(),
            "Searching stores"
        );
        StoreSearch {
            ticket,
            request: StoreRequest::Filtered(payload),
        }
    }

    fn menu_search(&self, ticket: MenuTicket, brand_id: BrandId) -> MenuSearch {
        let center = query::resolve_center(
            self.query_center,
            self.viewport.pending_center(),
            self.view.default_center,
        );
        MenuSearch {
            ticket,
            brand_id,
            payload: query::build(&self.filters, center).for_menus(),
        }
    }
}

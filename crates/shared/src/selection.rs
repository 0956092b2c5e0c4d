use crate::concern::{Accepted, Completion, Concern, Generation, Phase};
use crate::error::LocatorError;
use crate::models::{Menu, Store, StoreId};

/// Identifies one menu fetch: which generation, for which store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTicket {
    generation: Generation,
    store_id: StoreId,
}

impl MenuTicket {
    pub fn store_id(&self) -> StoreId {
        self.store_id
    }
}

/// The store shown in the bottom sheet, and its menu list.
pub struct SelectionController {
    selected: Option<Store>,
    menus: Vec<Menu>,
    concern: Concern,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self {
            selected: None,
            menus: Vec::new(),
            concern: Concern::new("menus"),
        }
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Store> {
        self.selected.as_ref()
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn phase(&self) -> &Phase {
        self.concern.phase()
    }

    pub fn select(&mut self, store: Store) -> MenuTicket {
        tracing::debug!(store_id = store.id, brand_id = store.brand_id, "Selected store");
        let store_id = store.id;
        self.selected = Some(store);
        self.menus.clear();
        MenuTicket {
            generation: self.concern.begin(),
            store_id,
        }
    }

    /// Re-fetch menus for the current selection. The current list stays
    /// visible until the new one arrives.
    pub fn refresh(&mut self) -> Option<MenuTicket> {
        let store_id = self.selected.as_ref()?.id;
        Some(MenuTicket {
            generation: self.concern.begin(),
            store_id,
        })
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.menus.clear();
        self.concern.reset();
    }

    pub fn complete(
        &mut self,
        ticket: MenuTicket,
        result: Result<Vec<Menu>, LocatorError>,
    ) -> Completion {
        if self.selected.as_ref().map(|s| s.id) != Some(ticket.store_id) {
            tracing::debug!(store_id = ticket.store_id, "Dropping menus for a deselected store");
            return Completion::Stale;
        }
        match self.concern.accept(ticket.generation, result) {
            Accepted::Value(menus) => {
                tracing::info!(store_id = ticket.store_id, menus = menus.len(), "Loaded menus");
                self.menus = menus;
                Completion::Applied
            }
            Accepted::Failed => Completion::Failed,
            Accepted::Stale => Completion::Stale,
        }
    }
}

use std::rc::Rc;

use calocheck_shared::api::ApiClient;
use calocheck_shared::concern::{Completion, Phase};
use calocheck_shared::config::LocatorConfig;
use calocheck_shared::filter::FilterState;
use calocheck_shared::map_sdk::MapEvent;
use calocheck_shared::models::{Menu, Store};
use calocheck_shared::search::{MenuSearch, SearchOrchestrator, StoreSearch};
use dioxus::prelude::*;
use futures::StreamExt;

use crate::components::bottom_sheet::BottomSheet;
use crate::components::header::Header;
use crate::components::map_view::MapView;
use crate::components::menu_list::MenuList;
use crate::components::sidebar::Sidebar;
use crate::kakao::{self, EventSink, KakaoMap};

pub const MAP_CONTAINER_ID: &str = "store-map";

type Orchestrator = SearchOrchestrator<KakaoMap>;
type OrchestratorSignal = Signal<Option<Orchestrator>>;

/// Text under the map: a load failure first, then "loading" until the map
/// exists, then whatever the store search reports.
fn map_status(map_error: Option<String>, map_ready: bool, search: Option<String>) -> Option<String> {
    match map_error {
        Some(err) => Some(err),
        None if !map_ready => Some("Loading map…".to_string()),
        None => search,
    }
}

/// Fetch stores for `search` and hand the result back to the orchestrator.
fn run_store_search(mut orchestrator: OrchestratorSignal, api: ApiClient, search: StoreSearch) {
    spawn(async move {
        let result = api.execute(&search.request).await;
        if let Some(o) = orchestrator.write().as_mut() {
            if o.finish_store_search(search.ticket, result) == Completion::Stale {
                tracing::debug!("Store response arrived after a newer search");
            }
        }
    });
}

fn run_menu_search(mut orchestrator: OrchestratorSignal, api: ApiClient, search: MenuSearch) {
    spawn(async move {
        let result = api.fetch_menus(search.brand_id, &search.payload).await;
        if let Some(o) = orchestrator.write().as_mut() {
            o.finish_menu_search(search.ticket, result);
        }
    });
}

#[component]
pub fn Locator() -> Element {
    let config = use_hook(LocatorConfig::from_env);
    let api = use_hook({
        let api_config = config.api.clone();
        move || ApiClient::new(&api_config)
    });

    let mut orchestrator: OrchestratorSignal = use_signal(|| None);
    let draft = use_signal(FilterState::sidebar_defaults);
    let mut map_error = use_signal(|| None::<String>);

    // Map listeners only enqueue; the orchestrator is touched from here.
    let events = use_coroutine({
        let api = api.clone();
        move |mut rx: UnboundedReceiver<MapEvent>| {
            let api = api.clone();
            async move {
                while let Some(event) = rx.next().await {
                    let menus = orchestrator
                        .write()
                        .as_mut()
                        .and_then(|o| o.handle_map_event(event));
                    if let Some(search) = menus {
                        run_menu_search(orchestrator, api.clone(), search);
                    }
                }
            }
        }
    });

    use_future({
        let api = api.clone();
        let view = config.view.clone();
        move || {
            let api = api.clone();
            let view = view.clone();
            async move {
                if let Err(e) = kakao::load_sdk().await {
                    tracing::error!(error = %e, "Map SDK unavailable");
                    map_error.set(Some(e.user_message()));
                    return;
                }
                let sink: EventSink = Rc::new(move |event| events.send(event));
                let map = match KakaoMap::create(
                    MAP_CONTAINER_ID,
                    view.default_center,
                    view.default_level,
                    sink,
                )
                .await
                {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::error!(error = %e, "Could not create the map");
                        map_error.set(Some(e.user_message()));
                        return;
                    }
                };

                let mut o = SearchOrchestrator::new(map, view);
                let search = o.initial_load();
                orchestrator.set(Some(o));
                run_store_search(orchestrator, api, search);
            }
        }
    });

    use_drop(move || {
        if let Ok(mut slot) = orchestrator.try_write() {
            if let Some(o) = slot.take() {
                drop(o.teardown());
                tracing::debug!("Map torn down");
            }
        }
    });

    let on_search = {
        let api = api.clone();
        move |_: ()| {
            let filters = draft.read().clone();
            let mut guard = orchestrator.write();
            let Some(o) = guard.as_mut() else {
                return;
            };
            let stores = o.apply_filters(filters);
            let menus = o.refresh_menus();
            drop(guard);
            run_store_search(orchestrator, api.clone(), stores);
            if let Some(menus) = menus {
                run_menu_search(orchestrator, api.clone(), menus);
            }
        }
    };

    let on_search_here = {
        let api = api.clone();
        move |_: ()| {
            let search = orchestrator.write().as_mut().map(|o| o.search_here(None));
            if let Some(search) = search {
                run_store_search(orchestrator, api.clone(), search);
            }
        }
    };

    let close_sheet = move |_: ()| {
        if let Some(o) = orchestrator.write().as_mut() {
            o.clear_selection();
        }
    };

    let view = orchestrator.read();
    let status = map_status(
        map_error.read().clone(),
        view.is_some(),
        view.as_ref().and_then(|o| o.status_message()),
    );
    let searching = view.as_ref().is_some_and(|o| o.store_phase().is_loading());
    let moved = view.as_ref().is_some_and(|o| o.viewport().is_dirty());
    let selected: Option<Store> = view.as_ref().and_then(|o| o.selection().selected().cloned());
    let menus: Vec<Menu> = view
        .as_ref()
        .map(|o| o.selection().menus().to_vec())
        .unwrap_or_default();
    let menu_phase = view
        .as_ref()
        .map(|o| o.menu_phase().clone())
        .unwrap_or(Phase::Idle);
    drop(view);

    let sheet_title = selected
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Menu".to_string());

    rsx! {
        div {
            class: "app",
            tabindex: "0",
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Escape {
                    if let Some(o) = orchestrator.write().as_mut() {
                        o.clear_selection();
                    }
                }
            },

            Header {}

            Sidebar {
                draft: draft,
                searching: searching,
                on_search: on_search,
            }

            MapView {
                container_id: MAP_CONTAINER_ID,
                show_search_here: moved && map_error.read().is_none(),
                status: status,
                on_search_here: on_search_here,
            }

            BottomSheet {
                open: selected.is_some(),
                title: sheet_title,
                on_close: close_sheet,
                if let Some(store) = &selected {
                    if let Some(address) = &store.address {
                        p { class: "store-address", "{address}" }
                    }
                }
                MenuList { menus: menus, phase: menu_phase }
            }
        }
    }
}

//! Kakao Maps JS SDK binding implementing `MapSdk`.
//!
//! The SDK script is injected with `autoload=false` and initialised through
//! `kakao.maps.load`. Map listeners are registered once when the map is
//! created and removed again when `KakaoMap` is dropped.

use std::cell::Cell;
use std::rc::Rc;

use calocheck_shared::geo::{Bounds, LatLng};
use calocheck_shared::map_sdk::{Anchor, MapEvent, MapSdk, MarkerIcon};
use calocheck_shared::models::StoreId;
use calocheck_shared::LocatorError;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

const SDK_URL: &str = "https://dapi.kakao.com/v2/maps/sdk.js";
const KAKAO_APP_KEY: Option<&str> = option_env!("KAKAO_APP_KEY");

const POLL_INTERVAL_MS: u32 = 100;
/// Give the script and the container five seconds to show up.
const POLL_ATTEMPTS: u32 = 50;

const MARKER_WIDTH: f64 = 28.0;
const MARKER_HEIGHT: f64 = 38.0;

mod sys {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
    extern "C" {
        #[derive(Debug, Clone)]
        pub type LatLng;
        #[wasm_bindgen(constructor)]
        pub fn new(lat: f64, lng: f64) -> LatLng;
        #[wasm_bindgen(method, js_name = getLat)]
        pub fn get_lat(this: &LatLng) -> f64;
        #[wasm_bindgen(method, js_name = getLng)]
        pub fn get_lng(this: &LatLng) -> f64;

        pub type LatLngBounds;
        #[wasm_bindgen(constructor)]
        pub fn new() -> LatLngBounds;
        #[wasm_bindgen(method)]
        pub fn extend(this: &LatLngBounds, latlng: &LatLng);

        #[derive(Debug, Clone)]
        pub type Map;
        #[wasm_bindgen(constructor)]
        pub fn new(container: &web_sys::Element, options: &JsValue) -> Map;
        #[wasm_bindgen(method, js_name = setBounds)]
        pub fn set_bounds(
            this: &Map,
            bounds: &LatLngBounds,
            top: u32,
            right: u32,
            bottom: u32,
            left: u32,
        );
        #[wasm_bindgen(method, js_name = getCenter)]
        pub fn get_center(this: &Map) -> LatLng;
        #[wasm_bindgen(method, js_name = setCenter)]
        pub fn set_center(this: &Map, latlng: &LatLng);
        #[wasm_bindgen(method, js_name = getLevel)]
        pub fn get_level(this: &Map) -> u8;
        #[wasm_bindgen(method, js_name = setLevel)]
        pub fn set_level(this: &Map, level: u8);

        pub type Size;
        #[wasm_bindgen(constructor)]
        pub fn new(width: f64, height: f64) -> Size;

        pub type MarkerImage;
        #[wasm_bindgen(constructor)]
        pub fn new(src: &str, size: &Size) -> MarkerImage;

        pub type Marker;
        #[wasm_bindgen(constructor)]
        pub fn new(options: &JsValue) -> Marker;
        #[wasm_bindgen(method, js_name = setMap)]
        pub fn set_map(this: &Marker, map: &JsValue);

        pub type CustomOverlay;
        #[wasm_bindgen(constructor)]
        pub fn new(options: &JsValue) -> CustomOverlay;
        #[wasm_bindgen(method, js_name = setMap)]
        pub fn set_map(this: &CustomOverlay, map: &JsValue);

        #[wasm_bindgen(catch)]
        pub fn load(callback: &js_sys::Function) -> Result<(), JsValue>;
    }

    #[wasm_bindgen(js_namespace = ["kakao", "maps", "event"])]
    extern "C" {
        #[wasm_bindgen(js_name = addListener)]
        pub fn add_listener(target: &JsValue, kind: &str, handler: &js_sys::Function);
        #[wasm_bindgen(js_name = removeListener)]
        pub fn remove_listener(target: &JsValue, kind: &str, handler: &js_sys::Function);
    }
}

/// Receives map events; the page forwards them to the orchestrator.
pub type EventSink = Rc<dyn Fn(MapEvent)>;

fn sdk_error(reason: impl Into<String>) -> LocatorError {
    LocatorError::SdkLoad(reason.into())
}

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

fn sdk_present() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &"kakao".into())
        .and_then(|kakao| js_sys::Reflect::get(&kakao, &"maps".into()))
        .map(|maps| !maps.is_undefined())
        .unwrap_or(false)
}

fn script_url(app_key: &str) -> String {
    format!("{SDK_URL}?appkey={app_key}&autoload=false")
}

fn inject_script() -> Result<(), LocatorError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| sdk_error("no document"))?;
    if document
        .query_selector(&format!("script[src*=\"{SDK_URL}\"]"))
        .ok()
        .flatten()
        .is_some()
    {
        return Ok(());
    }
    let Some(app_key) = KAKAO_APP_KEY else {
        return Err(sdk_error("KAKAO_APP_KEY was not set at build time"));
    };
    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| sdk_error(js_reason(&e)))?
        .unchecked_into();
    script.set_src(&script_url(app_key));
    let head = document.head().ok_or_else(|| sdk_error("no <head>"))?;
    head.append_child(&script)
        .map_err(|e| sdk_error(js_reason(&e)))?;
    tracing::debug!("Injected Kakao Maps script");
    Ok(())
}

async fn wait_for(mut ready: impl FnMut() -> bool) -> bool {
    for _ in 0..POLL_ATTEMPTS {
        if ready() {
            return true;
        }
        TimeoutFuture::new(POLL_INTERVAL_MS).await;
    }
    ready()
}

/// Make sure the SDK script is on the page and `kakao.maps.load` has run.
pub async fn load_sdk() -> Result<(), LocatorError> {
    if !sdk_present() {
        inject_script()?;
        if !wait_for(sdk_present).await {
            return Err(sdk_error("Kakao Maps script did not load"));
        }
    }

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = sys::load(&resolve) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| sdk_error(js_reason(&e)))?;
    tracing::info!("Kakao Maps SDK ready");
    Ok(())
}

fn options(entries: &[(&str, &JsValue)]) -> JsValue {
    let obj = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&obj, &JsValue::from_str(key), value).ok();
    }
    obj.into()
}

fn to_kakao(p: LatLng) -> sys::LatLng {
    sys::LatLng::new(p.lat, p.lon)
}

fn from_kakao(p: &sys::LatLng) -> LatLng {
    LatLng::new(p.get_lat(), p.get_lng())
}

/// Teardrop pin as an SVG data URI, colored by category.
pub fn marker_image_uri(icon: MarkerIcon) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 28 38'>\
         <path d='M14 37C14 37 2 22 2 13a12 12 0 0 1 24 0c0 9-12 24-12 24z' fill='{color}' stroke='white' stroke-width='2'/>\
         <text x='14' y='17' font-size='12' font-family='sans-serif' font-weight='700' fill='white' text-anchor='middle'>{glyph}</text>\
         </svg>",
        w = MARKER_WIDTH,
        h = MARKER_HEIGHT,
        color = icon.color,
        glyph = icon.glyph,
    );
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        svg.replace('%', "%25")
            .replace('#', "%23")
            .replace('<', "%3C")
            .replace('>', "%3E")
    )
}

pub struct KakaoMarker {
    marker: sys::Marker,
    on_click: Closure<dyn FnMut()>,
}

pub struct KakaoOverlay {
    overlay: sys::CustomOverlay,
    /// `None` when the label fell back to plain text content.
    element: Option<web_sys::Element>,
    on_click: Closure<dyn FnMut(web_sys::Event)>,
}

pub struct KakaoMap {
    map: sys::Map,
    document: web_sys::Document,
    sink: EventSink,
    /// Set while the view is moved programmatically so framing is not
    /// mistaken for the user panning.
    framing: Rc<Cell<bool>>,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl KakaoMap {
    /// Create the map inside `container_id` once that element exists.
    pub async fn create(
        container_id: &str,
        center: LatLng,
        level: u8,
        sink: EventSink,
    ) -> Result<Self, LocatorError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| sdk_error("no document"))?;
        if !wait_for(|| document.get_element_by_id(container_id).is_some()).await {
            return Err(sdk_error(format!("map container #{container_id} not found")));
        }
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| sdk_error("map container disappeared"))?;

        let opts = options(&[
            ("center", &to_kakao(center).into()),
            ("level", &JsValue::from(level)),
        ]);
        let map = sys::Map::new(&container, &opts);

        let mut kakao = KakaoMap {
            map,
            document,
            sink,
            framing: Rc::new(Cell::new(false)),
            listeners: Vec::new(),
        };
        kakao.listen("dragend");
        kakao.listen("zoom_changed");
        Ok(kakao)
    }

    fn listen(&mut self, kind: &'static str) {
        let map = self.map.clone();
        let sink = self.sink.clone();
        let framing = self.framing.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            if framing.get() {
                return;
            }
            sink(MapEvent::ViewportChanged {
                center: from_kakao(&map.get_center()),
                level: map.get_level(),
            });
        });
        sys::add_listener(self.map.as_ref(), kind, handler.as_ref().unchecked_ref());
        self.listeners.push((kind, handler));
    }

    fn framed<R>(&self, f: impl FnOnce(&sys::Map) -> R) -> R {
        self.framing.set(true);
        let out = f(&self.map);
        self.framing.set(false);
        out
    }
}

impl Drop for KakaoMap {
    fn drop(&mut self) {
        for (kind, handler) in self.listeners.drain(..) {
            sys::remove_listener(self.map.as_ref(), kind, handler.as_ref().unchecked_ref());
        }
    }
}

impl MapSdk for KakaoMap {
    type Marker = KakaoMarker;
    type Overlay = KakaoOverlay;

    fn create_marker(&mut self, position: LatLng, icon: MarkerIcon, store_id: StoreId) -> KakaoMarker {
        let image = sys::MarkerImage::new(
            &marker_image_uri(icon),
            &sys::Size::new(MARKER_WIDTH, MARKER_HEIGHT),
        );
        let marker = sys::Marker::new(&options(&[
            ("position", &to_kakao(position).into()),
            ("image", &image.into()),
            ("clickable", &JsValue::TRUE),
        ]));
        marker.set_map(self.map.as_ref());

        let sink = self.sink.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || sink(MapEvent::StoreActivated(store_id)));
        sys::add_listener(marker.as_ref(), "click", on_click.as_ref().unchecked_ref());

        KakaoMarker { marker, on_click }
    }

    fn create_overlay(
        &mut self,
        position: LatLng,
        text: &str,
        anchor: Anchor,
        store_id: StoreId,
    ) -> KakaoOverlay {
        let sink = self.sink.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |evt: web_sys::Event| {
            evt.stop_propagation();
            sink(MapEvent::StoreActivated(store_id));
        });

        let element = self.document.create_element("div").ok();
        let content: JsValue = match &element {
            Some(el) => {
                el.set_class_name("store-label");
                el.set_text_content(Some(text));
                el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
                    .ok();
                el.clone().into()
            }
            None => {
                tracing::warn!(store_id, "Label element unavailable, using plain text");
                JsValue::from_str(text)
            }
        };

        let overlay = sys::CustomOverlay::new(&options(&[
            ("position", &to_kakao(position).into()),
            ("content", &content),
            ("xAnchor", &JsValue::from(anchor.x)),
            ("yAnchor", &JsValue::from(anchor.y)),
            ("clickable", &JsValue::TRUE),
        ]));
        overlay.set_map(self.map.as_ref());

        KakaoOverlay {
            overlay,
            element,
            on_click,
        }
    }

    fn remove_marker(&mut self, marker: KakaoMarker) {
        marker.marker.set_map(&JsValue::NULL);
        sys::remove_listener(
            marker.marker.as_ref(),
            "click",
            marker.on_click.as_ref().unchecked_ref(),
        );
    }

    fn remove_overlay(&mut self, overlay: KakaoOverlay) {
        overlay.overlay.set_map(&JsValue::NULL);
        if let Some(el) = &overlay.element {
            el.remove_event_listener_with_callback("click", overlay.on_click.as_ref().unchecked_ref())
                .ok();
        }
    }

    fn fit_bounds(&mut self, bounds: &Bounds, padding_px: u32) {
        let (Some(sw), Some(ne)) = (bounds.south_west(), bounds.north_east()) else {
            return;
        };
        let kakao_bounds = sys::LatLngBounds::new();
        kakao_bounds.extend(&to_kakao(sw));
        kakao_bounds.extend(&to_kakao(ne));
        self.framed(|map| {
            map.set_bounds(&kakao_bounds, padding_px, padding_px, padding_px, padding_px)
        });
    }

    fn center(&self) -> LatLng {
        from_kakao(&self.map.get_center())
    }

    fn level(&self) -> u8 {
        self.map.get_level()
    }

    fn set_center(&mut self, center: LatLng) {
        let target = to_kakao(center);
        self.framed(|map| map.set_center(&target));
    }

    fn set_level(&mut self, level: u8) {
        self.framed(|map| map.set_level(level));
    }
}

// ============================================================================
// API DEL HOST - funciones imperativas llamadas desde la aplicación anfitriona
// ============================================================================
// El host embebe un control de navegador y llama a estas funciones; los
// eventos del mapa vuelven por window.onBoundsChanged / window.onAddressResolved
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::bridge::MapBridge;
use crate::config::CONFIG;
use crate::host::WindowHost;
use crate::loader;
use crate::maps::google::{GoogleGeocoder, GoogleMapView};
use crate::maps::traits::MapView;
use crate::models::{LatLng, MapType};

// Instancia única del bridge para la sesión de la página
thread_local! {
    static BRIDGE: RefCell<Option<MapBridge>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🗺️ gmaps-bridge cargado");
}

/// Construye el mapa en el contenedor configurado y registra los listeners
/// del widget. Difiere la construcción hasta que la API de mapas esté cargada.
#[wasm_bindgen]
pub fn init(lat: f64, lng: f64, zoom: f64, map_type: String) {
    loader::ensure_maps_api(
        &CONFIG.maps_api_key,
        Box::new(move || create_bridge(LatLng::new(lat, lng), zoom, &map_type)),
    );
}

/// Igual que `init`, con la vista inicial de la configuración
#[wasm_bindgen(js_name = initDefault)]
pub fn init_default() {
    let defaults = &CONFIG.map_defaults;
    init(
        defaults.center_lat,
        defaults.center_lng,
        defaults.zoom,
        defaults.map_type.clone(),
    );
}

/// Geocodifica la dirección y lleva el viewport al mejor resultado.
/// El efecto es asíncrono; un fallo del geocoder es un no-op silencioso.
#[wasm_bindgen(js_name = gotoAddress)]
pub fn goto_address(address: String) {
    with_bridge((), |bridge| bridge.goto_address(&address));
}

/// Resuelve la dirección del centro actual; el resultado llega por
/// window.onAddressResolved
#[wasm_bindgen(js_name = resolveAddress)]
pub fn resolve_address() {
    with_bridge((), |bridge| bridge.resolve_address());
}

/// Centra el mapa sin reemitir el cambio al host
#[wasm_bindgen(js_name = setCenter)]
pub fn set_center(lat: f64, lng: f64) {
    with_bridge((), |bridge| bridge.set_center(LatLng::new(lat, lng)));
}

/// Cambia el zoom (0..=20) sin reemitir el cambio al host
#[wasm_bindgen(js_name = setZoom)]
pub fn set_zoom(zoom: f64) {
    with_bridge((), |bridge| {
        if let Err(e) = bridge.set_zoom(zoom) {
            log::error!("❌ {}", e);
        }
    });
}

/// Cambia el tipo de mapa (roadmap | satellite | hybrid | terrain)
#[wasm_bindgen(js_name = setType)]
pub fn set_type(map_type: String) {
    match MapType::parse(&map_type) {
        Some(map_type) => with_bridge((), |bridge| bridge.set_map_type(map_type)),
        None => log::error!("❌ Tipo de mapa desconocido: {}", map_type),
    }
}

/// Coloca un marcador arrastrable con popup en el centro actual
#[wasm_bindgen(js_name = addMarker)]
pub fn add_marker(label: String) {
    with_bridge((), |bridge| {
        if let Err(e) = bridge.add_marker(&label) {
            log::error!("❌ No se pudo añadir el marcador: {}", e);
        }
    });
}

/// Centro actual en la forma "lat,lng"
#[wasm_bindgen(js_name = getCenter)]
pub fn get_center() -> String {
    with_bridge(String::new(), |bridge| bridge.center().to_string())
}

#[wasm_bindgen(js_name = getZoom)]
pub fn get_zoom() -> f64 {
    with_bridge(0.0, |bridge| bridge.zoom())
}

#[wasm_bindgen(js_name = getType)]
pub fn get_type() -> String {
    with_bridge(String::new(), |bridge| bridge.map_type().as_js_id().to_string())
}

/// Última dirección pedida o resuelta; no se actualiza al mover el mapa
#[wasm_bindgen(js_name = getAddress)]
pub fn get_address() -> String {
    with_bridge(String::new(), |bridge| bridge.address())
}

fn create_bridge(center: LatLng, zoom: f64, map_type: &str) {
    let map_type = match MapType::parse(map_type) {
        Some(map_type) => map_type,
        None => {
            log::error!("❌ Tipo de mapa desconocido: {}", map_type);
            return;
        }
    };
    let view = match GoogleMapView::create(&CONFIG.container_id, center, zoom, map_type) {
        Ok(view) => view,
        Err(e) => {
            log::error!("❌ No se pudo crear el mapa: {}", e);
            return;
        }
    };

    let view: Rc<RefCell<dyn MapView>> = Rc::new(RefCell::new(view));
    let bridge = MapBridge::new(
        view,
        Rc::new(GoogleGeocoder::new()),
        Rc::new(WindowHost),
        map_type,
    );
    BRIDGE.with(|cell| *cell.borrow_mut() = Some(bridge));
    log::info!("✅ Mapa inicializado");
}

fn with_bridge<T>(default: T, f: impl FnOnce(&MapBridge) -> T) -> T {
    BRIDGE.with(|cell| match &*cell.borrow() {
        Some(bridge) => f(bridge),
        None => {
            log::warn!("⚠️ Llamada al bridge antes de init");
            default
        }
    })
}

use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::ffi;
use super::traits::{Geocoder, MapError, MapView};
use crate::models::{GeocodeResponse, GeocodeResult, GeocodeStatus, LatLng, LatLngBounds, MapType};

/// Opciones de construcción del mapa (literal que espera la API)
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    disable_default_ui: bool,
    zoom: f64,
    center: LatLng,
    map_type_id: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerOptions {
    position: LatLng,
    title: String,
    draggable: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoWindowOptions {
    content: String,
    disable_auto_pan: bool,
}

/// Literal `LatLngBoundsLiteral` para fitBounds
#[derive(Serialize)]
struct BoundsLiteral {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

#[derive(Serialize)]
struct AddressRequest<'a> {
    address: &'a str,
}

#[derive(Serialize)]
struct LocationRequest {
    location: LatLng,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MapError::Js(e.to_string()))
}

/// Vista de mapa sobre `google.maps.Map`
pub struct GoogleMapView {
    map: ffi::JsMap,
}

impl GoogleMapView {
    /// Construye el mapa sobre el elemento contenedor, sin los controles de
    /// UI por defecto de la API.
    pub fn create(
        container_id: &str,
        center: LatLng,
        zoom: f64,
        map_type: MapType,
    ) -> Result<Self, MapError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| MapError::Js("no hay document".to_string()))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| MapError::ContainerMissing(container_id.to_string()))?;

        let options = to_js(&MapOptions {
            disable_default_ui: true,
            zoom,
            center,
            map_type_id: map_type.as_js_id(),
        })?;

        log::info!("🗺️ Creando mapa en #{} ({}, zoom {})", container_id, center, zoom);
        Ok(Self {
            map: ffi::JsMap::new(&container, &options),
        })
    }
}

impl MapView for GoogleMapView {
    fn center(&self) -> LatLng {
        let center = self.map.get_center();
        LatLng::new(center.lat(), center.lng())
    }

    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    fn pan_to(&mut self, center: LatLng) {
        if let Ok(center) = to_js(&center) {
            self.map.pan_to(&center);
        }
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.map.set_zoom(zoom);
    }

    fn set_map_type(&mut self, map_type: MapType) {
        self.map.set_map_type_id(map_type.as_js_id());
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        let literal = BoundsLiteral {
            south: bounds.south_west.lat,
            west: bounds.south_west.lng,
            north: bounds.north_east.lat,
            east: bounds.north_east.lng,
        };
        if let Ok(bounds) = to_js(&literal) {
            self.map.fit_bounds(&bounds);
        }
    }

    fn add_marker(&mut self, label: &str, position: LatLng) -> Result<(), MapError> {
        let marker_options = to_js(&MarkerOptions {
            position,
            title: label.to_string(),
            draggable: true,
        })?;
        let marker = ffi::JsMarker::new(&marker_options);
        marker.set_map(&self.map);

        let info_options = to_js(&InfoWindowOptions {
            content: label.to_string(),
            disable_auto_pan: true,
        })?;
        let info_window = ffi::JsInfoWindow::new(&info_options);

        // click sobre el marcador → abrir el popup
        let map = self.map.clone();
        let anchor = marker.clone();
        let on_click = Closure::wrap(Box::new(move || {
            info_window.open(&map, &anchor);
        }) as Box<dyn FnMut()>);
        ffi::add_listener(marker.as_ref(), "click", on_click.as_ref().unchecked_ref());
        // Los marcadores no se eliminan nunca; el listener vive tanto como la página
        on_click.forget();

        log::info!("📍 Marcador '{}' en {}", label, position);
        Ok(())
    }

    fn set_bounds_changed_handler(&mut self, handler: Box<dyn Fn(LatLng, f64)>) {
        // "dragend" y no "center_changed": center_changed dispara en ráfaga
        // durante el arrastre.
        let handler = Rc::new(handler);

        let map = self.map.clone();
        let on_dragend = {
            let handler = Rc::clone(&handler);
            Closure::wrap(Box::new(move || {
                let center = map.get_center();
                handler(LatLng::new(center.lat(), center.lng()), map.get_zoom());
            }) as Box<dyn FnMut()>)
        };
        ffi::add_listener(
            self.map.as_ref(),
            "dragend",
            on_dragend.as_ref().unchecked_ref(),
        );
        on_dragend.forget();

        let map = self.map.clone();
        let on_zoom_changed = Closure::wrap(Box::new(move || {
            let center = map.get_center();
            handler(LatLng::new(center.lat(), center.lng()), map.get_zoom());
        }) as Box<dyn FnMut()>);
        ffi::add_listener(
            self.map.as_ref(),
            "zoom_changed",
            on_zoom_changed.as_ref().unchecked_ref(),
        );
        on_zoom_changed.forget();
    }
}

/// Cliente de geocoding sobre `google.maps.Geocoder`
pub struct GoogleGeocoder {
    geocoder: ffi::JsGeocoder,
}

impl GoogleGeocoder {
    pub fn new() -> Self {
        Self {
            geocoder: ffi::JsGeocoder::new(),
        }
    }

    fn geocode(&self, request: Result<JsValue, MapError>, callback: Box<dyn FnOnce(GeocodeResponse)>) {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                log::error!("❌ No se pudo construir la petición de geocoding: {}", e);
                return;
            }
        };
        // NOTE: el callback llega de forma asíncrona, nunca dentro de la
        // llamada del host
        let on_response = Closure::once_into_js(move |results: JsValue, status: JsValue| {
            callback(parse_response(results, status));
        });
        self.geocoder.geocode(&request, on_response.unchecked_ref());
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode_address(&self, address: &str, callback: Box<dyn FnOnce(GeocodeResponse)>) {
        self.geocode(to_js(&AddressRequest { address }), callback);
    }

    fn geocode_location(&self, location: LatLng, callback: Box<dyn FnOnce(GeocodeResponse)>) {
        self.geocode(to_js(&LocationRequest { location }), callback);
    }
}

fn parse_response(results: JsValue, status: JsValue) -> GeocodeResponse {
    let status = status.as_string().unwrap_or_default();
    if status != "OK" {
        let status = if status == "ZERO_RESULTS" {
            GeocodeStatus::ZeroResults
        } else {
            GeocodeStatus::Error(status)
        };
        return GeocodeResponse::failed(status);
    }

    let results = js_sys::Array::from(&results)
        .iter()
        .filter_map(|value| parse_result(&value))
        .collect();
    GeocodeResponse::ok(results)
}

// Los resultados traen instancias (LatLng, LatLngBounds), no datos planos;
// se leen por Reflect en lugar de deserializarse.
fn parse_result(value: &JsValue) -> Option<GeocodeResult> {
    let formatted_address = js_sys::Reflect::get(value, &"formatted_address".into())
        .ok()?
        .as_string()?;
    let geometry = js_sys::Reflect::get(value, &"geometry".into()).ok()?;
    let location: ffi::JsLatLng = js_sys::Reflect::get(&geometry, &"location".into())
        .ok()?
        .unchecked_into();
    let viewport: ffi::JsLatLngBounds = js_sys::Reflect::get(&geometry, &"viewport".into())
        .ok()?
        .unchecked_into();

    let south_west = viewport.get_south_west();
    let north_east = viewport.get_north_east();
    Some(GeocodeResult {
        formatted_address,
        location: LatLng::new(location.lat(), location.lng()),
        viewport: LatLngBounds {
            south_west: LatLng::new(south_west.lat(), south_west.lng()),
            north_east: LatLng::new(north_east.lat(), north_east.lng()),
        },
    })
}

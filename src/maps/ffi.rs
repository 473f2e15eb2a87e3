// ============================================================================
// GOOGLE MAPS FFI - Foreign Function Interface para la API JavaScript
// ============================================================================
// Solo bindings a `google.maps.*` - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// google.maps.Map
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    pub type JsMap;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    pub fn new(container: &web_sys::Element, options: &JsValue) -> JsMap;

    #[wasm_bindgen(method, js_name = getCenter)]
    pub fn get_center(this: &JsMap) -> JsLatLng;

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &JsMap) -> f64;

    #[wasm_bindgen(method, js_name = panTo)]
    pub fn pan_to(this: &JsMap, center: &JsValue);

    #[wasm_bindgen(method, js_name = setZoom)]
    pub fn set_zoom(this: &JsMap, zoom: f64);

    #[wasm_bindgen(method, js_name = setMapTypeId)]
    pub fn set_map_type_id(this: &JsMap, type_id: &str);

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &JsMap, bounds: &JsValue);

    /// google.maps.LatLng (instancia devuelta por la API, no el literal)
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = LatLng)]
    pub type JsLatLng;

    #[wasm_bindgen(method)]
    pub fn lat(this: &JsLatLng) -> f64;

    #[wasm_bindgen(method)]
    pub fn lng(this: &JsLatLng) -> f64;

    /// google.maps.LatLngBounds (viewport de los resultados del geocoder)
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = LatLngBounds)]
    pub type JsLatLngBounds;

    #[wasm_bindgen(method, js_name = getSouthWest)]
    pub fn get_south_west(this: &JsLatLngBounds) -> JsLatLng;

    #[wasm_bindgen(method, js_name = getNorthEast)]
    pub fn get_north_east(this: &JsLatLngBounds) -> JsLatLng;

    /// google.maps.Marker
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    pub type JsMarker;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Marker")]
    pub fn new(options: &JsValue) -> JsMarker;

    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &JsMarker, map: &JsMap);

    /// google.maps.InfoWindow
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = InfoWindow)]
    pub type JsInfoWindow;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "InfoWindow")]
    pub fn new(options: &JsValue) -> JsInfoWindow;

    #[wasm_bindgen(method)]
    pub fn open(this: &JsInfoWindow, map: &JsMap, anchor: &JsMarker);

    /// google.maps.Geocoder
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Geocoder)]
    pub type JsGeocoder;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Geocoder")]
    pub fn new() -> JsGeocoder;

    #[wasm_bindgen(method)]
    pub fn geocode(this: &JsGeocoder, request: &JsValue, callback: &js_sys::Function);

    /// google.maps.event.addListener
    #[wasm_bindgen(js_namespace = ["google", "maps", "event"], js_name = addListener)]
    pub fn add_listener(target: &JsValue, event_name: &str, handler: &js_sys::Function);
}

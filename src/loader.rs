// Carga de la API de mapas. El host solo incrusta la página; el script de la
// API se inyecta desde aquí si aún no está presente y la inicialización del
// mapa se difiere hasta que `google.maps` exista.

use gloo_timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlScriptElement;

const SCRIPT_ID: &str = "gmaps-bridge-api";
const POLL_INTERVAL_MS: u32 = 50;
// ~10 segundos antes de rendirse
const MAX_ATTEMPTS: u32 = 200;

/// ¿Está ya disponible `window.google.maps`?
pub fn maps_api_ready() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let google = Reflect::get(&window, &JsValue::from_str("google")).unwrap_or(JsValue::UNDEFINED);
    if google.is_undefined() {
        return false;
    }
    !Reflect::get(&google, &JsValue::from_str("maps"))
        .unwrap_or(JsValue::UNDEFINED)
        .is_undefined()
}

/// Ejecuta `on_ready` en cuanto la API de mapas esté cargada, inyectando el
/// script si hace falta. Si la API ya está presente, `on_ready` corre de
/// forma síncrona.
pub fn ensure_maps_api(api_key: &str, on_ready: Box<dyn FnOnce()>) {
    if maps_api_ready() {
        on_ready();
        return;
    }
    inject_script(api_key);
    wait_for_api(on_ready, 0);
}

fn inject_script(api_key: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    // otro init ya inyectó el script
    if document.get_element_by_id(SCRIPT_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        log::error!("❌ La página no tiene <head>; no se puede cargar la API de mapas");
        return;
    };

    let script = match document
        .create_element("script")
        .map(|e| e.unchecked_into::<HtmlScriptElement>())
    {
        Ok(script) => script,
        Err(e) => {
            log::error!("❌ No se pudo crear el tag de script: {:?}", e);
            return;
        }
    };
    script.set_id(SCRIPT_ID);
    script.set_src(&format!(
        "https://maps.googleapis.com/maps/api/js?key={}",
        api_key
    ));
    script.set_async(true);

    if let Err(e) = head.append_child(&script) {
        log::error!("❌ No se pudo inyectar el script de la API: {:?}", e);
        return;
    }
    log::info!("🌐 Cargando la API de mapas...");
}

fn wait_for_api(on_ready: Box<dyn FnOnce()>, attempts: u32) {
    if maps_api_ready() {
        on_ready();
        return;
    }
    if attempts >= MAX_ATTEMPTS {
        log::error!("❌ La API de mapas no cargó; se descarta la inicialización");
        return;
    }
    Timeout::new(POLL_INTERVAL_MS, move || wait_for_api(on_ready, attempts + 1)).forget();
}

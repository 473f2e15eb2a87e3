use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::maps::traits::HostNotifier;

/// Notificador que invoca las funciones que el host instala en `window`
/// (`onBoundsChanged`, `onAddressResolved`). Un host que no instaló el
/// callback recibe un no-op silencioso.
pub struct WindowHost;

impl WindowHost {
    fn call(name: &str, args: &[JsValue]) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(value) = Reflect::get(&window, &JsValue::from_str(name)) else {
            return;
        };
        let Some(function) = value.dyn_ref::<Function>() else {
            log::debug!("Host sin callback {}", name);
            return;
        };

        let arguments = Array::new();
        for arg in args {
            arguments.push(arg);
        }
        if let Err(e) = function.apply(&JsValue::NULL, &arguments) {
            log::warn!("⚠️ El callback {} del host falló: {:?}", name, e);
        }
    }
}

impl HostNotifier for WindowHost {
    fn bounds_changed(&self, lat: f64, lng: f64, zoom: f64) {
        Self::call(
            "onBoundsChanged",
            &[JsValue::from_f64(lat), JsValue::from_f64(lng), JsValue::from_f64(zoom)],
        );
    }

    fn address_resolved(&self, formatted_address: &str) {
        Self::call("onAddressResolved", &[JsValue::from_str(formatted_address)]);
    }
}

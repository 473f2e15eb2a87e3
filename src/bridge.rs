// ============================================================================
// MAP BRIDGE - Fachada entre el host y el widget de mapa
// ============================================================================
// - Host → widget: comandos imperativos (centro, zoom, tipo, marcadores,
//   geocoding)
// - Widget → host: reemisión de eventos de bounds y direcciones resueltas
// - Las mutaciones iniciadas por el host NO se reemiten al host (guard de
//   supresión durante el tramo síncrono de la llamada)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::maps::traits::{Geocoder, HostNotifier, MapError, MapView};
use crate::models::{LatLng, MapType};

/// Rango de zoom válido del widget
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 20.0;

/// Estado compartido entre el bridge y el handler de eventos del widget.
/// Un solo hilo: el flag solo está levantado durante el tramo síncrono de
/// una mutación iniciada por el host.
struct BridgeState {
    events_blocked: Cell<bool>,
    center: Cell<LatLng>,
    zoom: Cell<f64>,
    map_type: Cell<MapType>,
    // Última dirección pedida o resuelta; no se actualiza al mover el mapa
    address: RefCell<String>,
}

/// Guard RAII de supresión de eventos. Restaura el valor anterior del flag
/// en todos los caminos de salida, incluido un panic.
struct SuppressGuard {
    state: Rc<BridgeState>,
    previous: bool,
}

impl SuppressGuard {
    fn raise(state: &Rc<BridgeState>) -> Self {
        let previous = state.events_blocked.replace(true);
        Self {
            state: Rc::clone(state),
            previous,
        }
    }
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        self.state.events_blocked.set(self.previous);
    }
}

/// Fachada que traduce comandos del host a llamadas del widget y reemite al
/// host los eventos del widget que no haya provocado el propio host.
///
/// Las dependencias (vista, geocoder, callbacks del host) se inyectan en la
/// construcción; el bridge no toca ningún global.
pub struct MapBridge {
    view: Rc<RefCell<dyn MapView>>,
    geocoder: Rc<dyn Geocoder>,
    host: Rc<dyn HostNotifier>,
    state: Rc<BridgeState>,
}

impl MapBridge {
    /// Crea el bridge y registra el handler de bounds sobre la vista.
    pub fn new(
        view: Rc<RefCell<dyn MapView>>,
        geocoder: Rc<dyn Geocoder>,
        host: Rc<dyn HostNotifier>,
        map_type: MapType,
    ) -> Self {
        let (center, zoom) = {
            let view = view.borrow();
            (view.center(), view.zoom())
        };
        let state = Rc::new(BridgeState {
            events_blocked: Cell::new(false),
            center: Cell::new(center),
            zoom: Cell::new(zoom),
            map_type: Cell::new(map_type),
            address: RefCell::new(String::new()),
        });

        {
            // El handler solo captura estado compartido y el notificador:
            // puede dispararse dentro del tramo síncrono de una mutación sin
            // volver a entrar en el bridge.
            let state = Rc::clone(&state);
            let host = Rc::clone(&host);
            view.borrow_mut()
                .set_bounds_changed_handler(Box::new(move |center, zoom| {
                    if state.events_blocked.get() {
                        // cambio provocado por el host: no reemitir
                        return;
                    }
                    state.center.set(center);
                    state.zoom.set(zoom);
                    host.bounds_changed(center.lat, center.lng, zoom);
                }));
        }

        Self {
            view,
            geocoder,
            host,
            state,
        }
    }

    /// Centrar el mapa. El cambio no se reemite al host como bounds-changed.
    pub fn set_center(&self, center: LatLng) {
        if self.state.center.get() == center {
            return;
        }
        self.state.center.set(center);
        let _guard = SuppressGuard::raise(&self.state);
        self.view.borrow_mut().pan_to(center);
    }

    /// Cambiar el zoom. El cambio no se reemite al host como bounds-changed.
    pub fn set_zoom(&self, zoom: f64) -> Result<(), MapError> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(MapError::InvalidZoom(zoom));
        }
        if self.state.zoom.get() == zoom {
            return Ok(());
        }
        self.state.zoom.set(zoom);
        let _guard = SuppressGuard::raise(&self.state);
        self.view.borrow_mut().set_zoom(zoom);
        Ok(())
    }

    /// Cambiar el tipo de mapa. No levanta la supresión: los listeners de
    /// bounds no observan cambios de tipo.
    pub fn set_map_type(&self, map_type: MapType) {
        self.state.map_type.set(map_type);
        self.view.borrow_mut().set_map_type(map_type);
    }

    /// Geocodificar la dirección y ajustar el viewport al mejor resultado.
    /// Sin correlación petición/respuesta: una respuesta tardía de una
    /// llamada anterior puede pisar el efecto de una posterior.
    pub fn goto_address(&self, address: &str) {
        log::info!("📫 Geocodificando dirección: {}", address);
        *self.state.address.borrow_mut() = address.to_string();
        let view = Rc::clone(&self.view);
        self.geocoder.geocode_address(
            address,
            Box::new(move |response| {
                if let Some(result) = response.first_ok() {
                    view.borrow_mut().fit_bounds(result.viewport);
                } else {
                    // fallo del geocoder: no-op hacia el host
                    log::debug!("Geocoder sin resultados: {:?}", response.status);
                }
            }),
        );
    }

    /// Resolver la dirección del centro actual; el resultado llega por
    /// `HostNotifier::address_resolved`.
    pub fn resolve_address(&self) {
        let location = self.view.borrow().center();
        log::info!("🔎 Resolviendo la dirección de {}", location);
        let state = Rc::clone(&self.state);
        let host = Rc::clone(&self.host);
        self.geocoder.geocode_location(
            location,
            Box::new(move |response| {
                if let Some(result) = response.first_ok() {
                    *state.address.borrow_mut() = result.formatted_address.clone();
                    host.address_resolved(&result.formatted_address);
                } else {
                    log::debug!("Geocoder sin resultados: {:?}", response.status);
                }
            }),
        );
    }

    /// Colocar un marcador arrastrable con popup en el centro actual
    pub fn add_marker(&self, label: &str) -> Result<(), MapError> {
        let position = self.view.borrow().center();
        self.view.borrow_mut().add_marker(label, position)
    }

    pub fn center(&self) -> LatLng {
        self.state.center.get()
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom.get()
    }

    pub fn map_type(&self) -> MapType {
        self.state.map_type.get()
    }

    /// Última dirección pedida o resuelta
    pub fn address(&self) -> String {
        self.state.address.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeocodeResponse, GeocodeResult, GeocodeStatus, LatLngBounds};

    struct MockView {
        center: Cell<LatLng>,
        zoom: Cell<f64>,
        pan_calls: Cell<usize>,
        zoom_calls: Cell<usize>,
        fitted: RefCell<Vec<LatLngBounds>>,
        markers: RefCell<Vec<(String, LatLng)>>,
        map_type: Cell<MapType>,
        handler: RefCell<Option<Box<dyn Fn(LatLng, f64)>>>,
    }

    impl MockView {
        fn new(center: LatLng, zoom: f64) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                center: Cell::new(center),
                zoom: Cell::new(zoom),
                pan_calls: Cell::new(0),
                zoom_calls: Cell::new(0),
                fitted: RefCell::new(Vec::new()),
                markers: RefCell::new(Vec::new()),
                map_type: Cell::new(MapType::Roadmap),
                handler: RefCell::new(None),
            }))
        }

        // Notificación del widget con el estado actual (un drag del usuario,
        // o la notificación síncrona dentro de pan_to / set_zoom)
        fn emit_bounds_changed(&self) {
            if let Some(handler) = &*self.handler.borrow() {
                handler(self.center.get(), self.zoom.get());
            }
        }

        // Drag del usuario: mueve la vista y notifica
        fn drag_to(&self, center: LatLng) {
            self.center.set(center);
            self.emit_bounds_changed();
        }
    }

    impl MapView for MockView {
        fn center(&self) -> LatLng {
            self.center.get()
        }

        fn zoom(&self) -> f64 {
            self.zoom.get()
        }

        fn pan_to(&mut self, center: LatLng) {
            self.pan_calls.set(self.pan_calls.get() + 1);
            self.center.set(center);
            // el widget notifica síncronamente dentro de la llamada
            self.emit_bounds_changed();
        }

        fn set_zoom(&mut self, zoom: f64) {
            self.zoom_calls.set(self.zoom_calls.get() + 1);
            self.zoom.set(zoom);
            self.emit_bounds_changed();
        }

        fn set_map_type(&mut self, map_type: MapType) {
            self.map_type.set(map_type);
            // el widget real no notifica bounds al cambiar de tipo; se emite
            // aquí para comprobar que el bridge tampoco lo suprimiría
            self.emit_bounds_changed();
        }

        fn fit_bounds(&mut self, bounds: LatLngBounds) {
            self.fitted.borrow_mut().push(bounds);
        }

        fn add_marker(&mut self, label: &str, position: LatLng) -> Result<(), MapError> {
            self.markers.borrow_mut().push((label.to_string(), position));
            Ok(())
        }

        fn set_bounds_changed_handler(&mut self, handler: Box<dyn Fn(LatLng, f64)>) {
            *self.handler.borrow_mut() = Some(handler);
        }
    }

    /// Geocoder que retiene los callbacks hasta que el test los complete,
    /// como la cola de eventos del navegador
    #[derive(Default)]
    struct MockGeocoder {
        address_requests: RefCell<Vec<String>>,
        location_requests: RefCell<Vec<LatLng>>,
        pending: RefCell<Vec<Box<dyn FnOnce(GeocodeResponse)>>>,
    }

    impl MockGeocoder {
        fn complete_next(&self, response: GeocodeResponse) {
            self.complete_at(0, response);
        }

        fn complete_at(&self, index: usize, response: GeocodeResponse) {
            let callback = self.pending.borrow_mut().remove(index);
            callback(response);
        }
    }

    impl Geocoder for MockGeocoder {
        fn geocode_address(&self, address: &str, callback: Box<dyn FnOnce(GeocodeResponse)>) {
            self.address_requests.borrow_mut().push(address.to_string());
            self.pending.borrow_mut().push(callback);
        }

        fn geocode_location(&self, location: LatLng, callback: Box<dyn FnOnce(GeocodeResponse)>) {
            self.location_requests.borrow_mut().push(location);
            self.pending.borrow_mut().push(callback);
        }
    }

    #[derive(Default)]
    struct MockHost {
        bounds_events: RefCell<Vec<(f64, f64, f64)>>,
        resolved: RefCell<Vec<String>>,
    }

    impl HostNotifier for MockHost {
        fn bounds_changed(&self, lat: f64, lng: f64, zoom: f64) {
            self.bounds_events.borrow_mut().push((lat, lng, zoom));
        }

        fn address_resolved(&self, formatted_address: &str) {
            self.resolved.borrow_mut().push(formatted_address.to_string());
        }
    }

    struct Fixture {
        view: Rc<RefCell<MockView>>,
        geocoder: Rc<MockGeocoder>,
        host: Rc<MockHost>,
        bridge: MapBridge,
    }

    fn fixture() -> Fixture {
        let view = MockView::new(LatLng::new(33.0, 5.0), 2.0);
        let geocoder = Rc::new(MockGeocoder::default());
        let host = Rc::new(MockHost::default());
        let view_dyn: Rc<RefCell<dyn MapView>> = view.clone();
        let bridge = MapBridge::new(view_dyn, geocoder.clone(), host.clone(), MapType::Hybrid);
        Fixture {
            view,
            geocoder,
            host,
            bridge,
        }
    }

    fn hamburg_response() -> GeocodeResponse {
        GeocodeResponse::ok(vec![GeocodeResult {
            formatted_address: "Hamburg, Germany".to_string(),
            location: LatLng::new(53.5511, 9.9937),
            viewport: LatLngBounds {
                south_west: LatLng::new(53.3951, 9.7312),
                north_east: LatLng::new(53.7394, 10.3252),
            },
        }])
    }

    #[test]
    fn test_set_center_does_not_echo_to_host() {
        let f = fixture();
        f.bridge.set_center(LatLng::new(48.8566, 2.3522));

        // el widget notificó síncronamente dentro de pan_to...
        assert_eq!(f.view.borrow().pan_calls.get(), 1);
        // ...pero nada llegó al host
        assert!(f.host.bounds_events.borrow().is_empty());
        assert_eq!(f.bridge.center(), LatLng::new(48.8566, 2.3522));
    }

    #[test]
    fn test_set_center_unchanged_is_a_no_op() {
        let f = fixture();
        f.bridge.set_center(LatLng::new(33.0, 5.0));
        assert_eq!(f.view.borrow().pan_calls.get(), 0);
    }

    #[test]
    fn test_set_zoom_does_not_echo_to_host() {
        let f = fixture();
        f.bridge.set_zoom(9.0).unwrap();

        assert_eq!(f.view.borrow().zoom_calls.get(), 1);
        assert!(f.host.bounds_events.borrow().is_empty());
        assert_eq!(f.bridge.zoom(), 9.0);
    }

    #[test]
    fn test_set_zoom_rejects_out_of_range() {
        let f = fixture();
        assert_eq!(f.bridge.set_zoom(-1.0), Err(MapError::InvalidZoom(-1.0)));
        assert_eq!(f.bridge.set_zoom(21.0), Err(MapError::InvalidZoom(21.0)));
        assert_eq!(f.view.borrow().zoom_calls.get(), 0);
        assert_eq!(f.bridge.zoom(), 2.0);
    }

    #[test]
    fn test_set_zoom_unchanged_is_a_no_op() {
        let f = fixture();
        f.bridge.set_zoom(2.0).unwrap();
        assert_eq!(f.view.borrow().zoom_calls.get(), 0);
    }

    #[test]
    fn test_user_drag_reaches_host_exactly_once() {
        let f = fixture();
        f.view.borrow().drag_to(LatLng::new(53.5511, 9.9937));

        let events = f.host.bounds_events.borrow();
        assert_eq!(*events, vec![(53.5511, 9.9937, 2.0)]);
        // la caché del bridge queda sincronizada
        assert_eq!(f.bridge.center(), LatLng::new(53.5511, 9.9937));
    }

    #[test]
    fn test_suppression_clears_after_the_call() {
        let f = fixture();
        f.bridge.set_center(LatLng::new(48.8566, 2.3522));
        assert!(f.host.bounds_events.borrow().is_empty());

        // un drag posterior del usuario vuelve a reemitirse
        f.view.borrow().drag_to(LatLng::new(40.4168, -3.7038));
        assert_eq!(f.host.bounds_events.borrow().len(), 1);
    }

    #[test]
    fn test_set_map_type_does_not_suppress() {
        let f = fixture();
        f.bridge.set_map_type(MapType::Terrain);

        assert_eq!(f.view.borrow().map_type.get(), MapType::Terrain);
        assert_eq!(f.bridge.map_type(), MapType::Terrain);
        // el mock emite bounds dentro de set_map_type; sin guard, el evento
        // llega al host
        assert_eq!(f.host.bounds_events.borrow().len(), 1);
    }

    #[test]
    fn test_goto_address_fits_viewport_on_success() {
        let f = fixture();
        f.bridge.goto_address("Hamburg");

        assert_eq!(*f.geocoder.address_requests.borrow(), vec!["Hamburg"]);
        assert_eq!(f.bridge.address(), "Hamburg");
        assert!(f.view.borrow().fitted.borrow().is_empty());

        f.geocoder.complete_next(hamburg_response());
        let fitted = f.view.borrow().fitted.borrow().clone();
        assert_eq!(
            fitted,
            vec![LatLngBounds {
                south_west: LatLng::new(53.3951, 9.7312),
                north_east: LatLng::new(53.7394, 10.3252),
            }]
        );
    }

    #[test]
    fn test_goto_address_failure_is_silent() {
        let f = fixture();
        f.bridge.goto_address("gibberish-unresolvable-string");
        f.geocoder
            .complete_next(GeocodeResponse::failed(GeocodeStatus::ZeroResults));

        assert!(f.view.borrow().fitted.borrow().is_empty());
        assert!(f.host.bounds_events.borrow().is_empty());
        // la dirección pedida queda registrada aunque no se resuelva
        assert_eq!(f.bridge.address(), "gibberish-unresolvable-string");
    }

    #[test]
    fn test_stale_goto_address_response_still_applies() {
        // Sin correlación petición/respuesta: la última respuesta en llegar
        // gana, aunque pertenezca a la petición más vieja
        let f = fixture();
        f.bridge.goto_address("Hamburg");
        f.bridge.goto_address("Paris");

        let paris = GeocodeResponse::ok(vec![GeocodeResult {
            formatted_address: "Paris, France".to_string(),
            location: LatLng::new(48.8566, 2.3522),
            viewport: LatLngBounds {
                south_west: LatLng::new(48.8156, 2.2242),
                north_east: LatLng::new(48.9021, 2.4699),
            },
        }]);

        // la respuesta de Paris llega primero; la de Hamburg, después
        f.geocoder.complete_at(1, paris);
        f.geocoder.complete_at(0, hamburg_response());

        let fitted = f.view.borrow().fitted.borrow().clone();
        assert_eq!(fitted.len(), 2);
        // el viewport que queda aplicado es el de la respuesta tardía
        assert_eq!(
            fitted.last(),
            Some(&LatLngBounds {
                south_west: LatLng::new(53.3951, 9.7312),
                north_east: LatLng::new(53.7394, 10.3252),
            })
        );
    }

    #[test]
    fn test_resolve_address_notifies_host() {
        let f = fixture();
        f.bridge.resolve_address();

        // la petición usa el centro actual de la vista
        assert_eq!(
            *f.geocoder.location_requests.borrow(),
            vec![LatLng::new(33.0, 5.0)]
        );

        f.geocoder.complete_next(hamburg_response());
        assert_eq!(*f.host.resolved.borrow(), vec!["Hamburg, Germany"]);
        assert_eq!(f.bridge.address(), "Hamburg, Germany");
    }

    #[test]
    fn test_resolve_address_failure_is_silent() {
        let f = fixture();
        f.bridge.resolve_address();
        f.geocoder
            .complete_next(GeocodeResponse::failed(GeocodeStatus::Error(
                "OVER_QUERY_LIMIT".to_string(),
            )));

        assert!(f.host.resolved.borrow().is_empty());
        assert_eq!(f.bridge.address(), "");
    }

    #[test]
    fn test_add_marker_uses_current_center() {
        let f = fixture();
        f.view.borrow().drag_to(LatLng::new(40.4168, -3.7038));
        f.bridge.add_marker("Home").unwrap();

        let markers = f.view.borrow().markers.borrow().clone();
        assert_eq!(
            markers,
            vec![("Home".to_string(), LatLng::new(40.4168, -3.7038))]
        );
    }

    #[test]
    fn test_initial_state_is_seeded_from_the_view() {
        let f = fixture();
        assert_eq!(f.bridge.center(), LatLng::new(33.0, 5.0));
        assert_eq!(f.bridge.zoom(), 2.0);
        assert_eq!(f.bridge.map_type(), MapType::Hybrid);
        assert_eq!(f.bridge.address(), "");
    }

    #[test]
    fn test_suppress_guard_restores_previous_value() {
        let f = fixture();
        let outer = SuppressGuard::raise(&f.bridge.state);
        {
            let _inner = SuppressGuard::raise(&f.bridge.state);
            assert!(f.bridge.state.events_blocked.get());
        }
        // el guard interno no limpia la supresión del externo
        assert!(f.bridge.state.events_blocked.get());
        drop(outer);
        assert!(!f.bridge.state.events_blocked.get());
    }
}

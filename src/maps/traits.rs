use crate::models::{GeocodeResponse, LatLng, LatLngBounds, MapType};

/// Trait común para el widget de mapa. Toda la lógica de render, viewport y
/// marcadores vive en la API externa; esto es solo su superficie de llamada.
pub trait MapView {
    /// Centro actual de la vista
    fn center(&self) -> LatLng;

    /// Nivel de zoom actual
    fn zoom(&self) -> f64;

    /// Desplazar la vista a un centro nuevo
    fn pan_to(&mut self, center: LatLng);

    /// Cambiar el nivel de zoom
    fn set_zoom(&mut self, zoom: f64);

    /// Cambiar el tipo de mapa
    fn set_map_type(&mut self, map_type: MapType);

    /// Ajustar el viewport al rectángulo dado
    fn fit_bounds(&mut self, bounds: LatLngBounds);

    /// Colocar un marcador arrastrable con popup en la posición dada.
    /// No existe operación de borrado ni de actualización.
    fn add_marker(&mut self, label: &str, position: LatLng) -> Result<(), MapError>;

    /// Registrar el handler que el widget invoca con (centro, zoom) actuales
    /// cuando el usuario mueve o hace zoom sobre el mapa
    fn set_bounds_changed_handler(&mut self, handler: Box<dyn Fn(LatLng, f64)>);
}

/// Cliente de geocoding. Las respuestas llegan de forma asíncrona por la
/// misma cola de eventos; no hay cancelación de peticiones en vuelo.
pub trait Geocoder {
    /// Geocodificar una dirección textual
    fn geocode_address(&self, address: &str, callback: Box<dyn FnOnce(GeocodeResponse)>);

    /// Geocodificación inversa de una ubicación
    fn geocode_location(&self, location: LatLng, callback: Box<dyn FnOnce(GeocodeResponse)>);
}

/// Callbacks hacia la aplicación anfitriona
pub trait HostNotifier {
    fn bounds_changed(&self, lat: f64, lng: f64, zoom: f64);

    fn address_resolved(&self, formatted_address: &str);
}

/// Error del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    ContainerMissing(String),
    InvalidZoom(f64),
    Js(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::ContainerMissing(id) => write!(f, "Map container '{}' not found", id),
            MapError::InvalidZoom(zoom) => write!(f, "Illegal zoom value: {}", zoom),
            MapError::Js(msg) => write!(f, "JS error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

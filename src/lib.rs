// ============================================================================
// GMAPS BRIDGE - Adaptador entre una aplicación anfitriona y Google Maps
// ============================================================================
// - Host → bridge: funciones imperativas (ver api.rs)
// - Bridge → host: callbacks onBoundsChanged / onAddressResolved
// - Toda la lógica de mapas (render, geocoding, viewport, marcadores) se
//   delega a la API externa; aquí solo vive el reenvío de llamadas y eventos
// ============================================================================

pub mod bridge;
pub mod config;
pub mod maps;
pub mod models;

#[cfg(target_arch = "wasm32")]
pub mod api;

#[cfg(target_arch = "wasm32")]
pub mod host;

#[cfg(target_arch = "wasm32")]
pub mod loader;

pub use bridge::MapBridge;
pub use maps::traits::{Geocoder, HostNotifier, MapError, MapView};
pub use models::{GeocodeResponse, GeocodeResult, GeocodeStatus, LatLng, LatLngBounds, MapType};

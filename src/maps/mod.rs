// Módulo de mapas: traits comunes + implementación sobre la API de Google Maps

#[cfg(target_arch = "wasm32")]
pub mod ffi;

#[cfg(target_arch = "wasm32")]
pub mod google;

// Traits comunes (también compilan en nativo, para los tests del bridge)
pub mod traits;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordenadas geográficas (misma forma que el literal `{ lat, lng }` de la API de mapas)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

// Forma "lat,lng" que intercambia el host
impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Rectángulo geográfico (viewport resuelto por el geocoder)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

/// Tipo de mapa soportado por el widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapType {
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

impl MapType {
    /// Identificador que espera la API de mapas (`mapTypeId`)
    pub fn as_js_id(&self) -> &'static str {
        match self {
            MapType::Roadmap => "roadmap",
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Terrain => "terrain",
        }
    }

    /// Parsear el identificador recibido del host (acepta mayúsculas o minúsculas)
    pub fn parse(value: &str) -> Option<MapType> {
        match value.to_ascii_lowercase().as_str() {
            "roadmap" => Some(MapType::Roadmap),
            "satellite" => Some(MapType::Satellite),
            "hybrid" => Some(MapType::Hybrid),
            "terrain" => Some(MapType::Terrain),
            _ => None,
        }
    }
}

/// Estado de una respuesta del servicio de geocoding
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeStatus {
    Ok,
    ZeroResults,
    Error(String),
}

/// Resultado individual del geocoder
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub location: LatLng,
    pub viewport: LatLngBounds,
}

/// Respuesta completa del geocoder. Solo se consulta el primer resultado;
/// los resultados múltiples se ignoran.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResponse {
    pub status: GeocodeStatus,
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    pub fn ok(results: Vec<GeocodeResult>) -> Self {
        Self {
            status: GeocodeStatus::Ok,
            results,
        }
    }

    pub fn failed(status: GeocodeStatus) -> Self {
        Self {
            status,
            results: Vec::new(),
        }
    }

    /// Primer resultado si el estado es OK y la lista no está vacía
    pub fn first_ok(&self) -> Option<&GeocodeResult> {
        if self.status == GeocodeStatus::Ok {
            self.results.first()
        } else {
            None
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::models::LatLng;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub maps_api_key: String,
    pub container_id: String,
    pub enable_logging: bool,
    pub map_defaults: MapDefaults,
}

/// Vista inicial cuando el host llama a `init` sin haber elegido otra cosa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDefaults {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f64,
    pub map_type: String,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center_lat: 33.0,
            center_lng: 5.0,
            zoom: 2.0,
            map_type: "hybrid".to_string(),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            maps_api_key: String::new(),
            container_id: "map_canvas".to_string(),
            enable_logging: true,
            map_defaults: MapDefaults::default(),
        }
    }
}

impl BridgeConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            maps_api_key: option_env!("GMAPS_API_KEY").unwrap_or("").to_string(),
            container_id: option_env!("GMAPS_CONTAINER_ID")
                .unwrap_or("map_canvas")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            map_defaults: MapDefaults {
                center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .unwrap_or("33.0")
                    .parse()
                    .unwrap_or(33.0),
                center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .unwrap_or("5.0")
                    .parse()
                    .unwrap_or(5.0),
                zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .unwrap_or("2.0")
                    .parse()
                    .unwrap_or(2.0),
                map_type: option_env!("DEFAULT_MAP_TYPE")
                    .unwrap_or("hybrid")
                    .to_string(),
            },
        }
    }

    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.map_defaults.center_lat, self.map_defaults.center_lng)
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: BridgeConfig = BridgeConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_original_demo_view() {
        let config = BridgeConfig::default();
        assert_eq!(config.container_id, "map_canvas");
        assert_eq!(config.default_center(), LatLng::new(33.0, 5.0));
        assert_eq!(config.map_defaults.zoom, 2.0);
        assert_eq!(config.map_defaults.map_type, "hybrid");
    }
}

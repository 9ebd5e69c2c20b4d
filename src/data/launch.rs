//! Launch listings as delivered by the upstream feed.
//!
//! Only `name`, `latitude` and `longitude` matter to the engine; the other
//! fields ride along so a click handler can show details.

use crate::{core::geo::LatLng, GlobeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub id: String,
    pub name: String,
    /// Launch window as reported by the feed (free text, usually ISO 8601)
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub provider: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Launch {
    /// Raw coordinate, not checked
    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Coordinate checked for finiteness and range
    pub fn position(&self) -> Result<LatLng> {
        let position = self.lat_lng();
        if position.is_valid() {
            Ok(position)
        } else {
            Err(GlobeError::InvalidCoordinates(format!(
                "launch '{}' at ({}, {})",
                self.id, self.latitude, self.longitude
            )))
        }
    }
}

/// Parse a JSON array of launches
pub fn parse_launches(json: &str) -> Result<Vec<Launch>> {
    let launches: Vec<Launch> = serde_json::from_str(json)?;
    log::debug!("parsed {} launches", launches.len());
    Ok(launches)
}

/// Read and parse a JSON file of launches
pub fn load_launches(path: impl AsRef<Path>) -> Result<Vec<Launch>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    parse_launches(&contents)
}

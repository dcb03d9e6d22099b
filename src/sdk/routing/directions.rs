//! Response types in the Mapbox Directions v5 schema.

use super::coords::LngLat;
use serde::{Deserialize, Serialize};

pub const LINE_STRING: &str = "LineString";
pub const RESPONSE_OK: &str = "Ok";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub routes: Vec<Route>,
    pub waypoints: Vec<Waypoint>,
    pub code: String,
    pub uuid: String,
}

impl DirectionsResponse {
    /// Wraps a converted route, stamping the status code and a fresh
    /// correlation id.
    pub fn new(route: Route, waypoints: Vec<Waypoint>) -> Self {
        Self {
            routes: vec![route],
            waypoints,
            code: RESPONSE_OK.to_string(),
            uuid: correlation_id(),
        }
    }
}

/// Random non-negative 63-bit integer in decimal.
pub fn correlation_id() -> String {
    (rand::random::<u64>() >> 1).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub weight_typical: f64,
    pub duration_typical: f64,
    pub weight_name: String,
    pub weight: f64,
    pub duration: f64,
    pub distance: f64,
    pub legs: Vec<Leg>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub via_waypoints: Vec<serde_json::Value>,
    pub admins: Vec<serde_json::Value>,
    pub annotation: Annotation,
    pub weight_typical: f64,
    pub duration_typical: f64,
    pub steps: Vec<Step>,
    pub distance: f64,
    pub duration: f64,
    pub summary: String,
}

impl Leg {
    /// Total number of coordinates across all steps, which the max speed
    /// annotation lines up with.
    pub fn coordinate_count(&self) -> usize {
        self.steps.iter().map(|s| s.geometry.coordinates.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub maxspeed: Vec<MaxSpeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxSpeed {
    pub speed: f64,
    pub unit: String,
}

impl MaxSpeed {
    pub fn kmh(speed: f64) -> Self {
        Self {
            speed,
            unit: "km/h".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub geometry: Geometry,
    pub distance: f64,
    #[serde(rename = "bannerInstructions")]
    pub banner_instructions: Vec<String>,
    pub duration: f64,
    pub duration_typical: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Geometry {
    pub fn line_string(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            coordinates,
            kind: LINE_STRING.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub distance: f64,
    pub name: String,
    pub location: [f64; 2],
}

impl Waypoint {
    pub fn at(location: LngLat) -> Self {
        Self {
            location: location.as_array(),
            ..Default::default()
        }
    }
}

use crate::sdk::routing::coords::InternalPoint;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Careland route plan response ---

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutePlanResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub error_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub route_info: Vec<RouteInfo>,
}

impl RoutePlanResponse {
    /// Anchors the first travel segment at the true route origin. The
    /// provider reports its own snapped point there, which would misplace
    /// the first step's geometry.
    pub fn inject_origin(&mut self, origin: InternalPoint) {
        if let Some(segment) = self
            .route_info
            .first_mut()
            .and_then(|route| route.travel_desc.first_mut())
        {
            segment.x = origin.x;
            segment.y = origin.y;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_distance: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub point_num: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub prefer: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub travel_id: i64,
    #[serde(rename = "routeindex")]
    #[serde(deserialize_with = "null_as_default")]
    pub route_index: i64,
    #[serde(rename = "routeid")]
    #[serde(deserialize_with = "null_as_default")]
    pub route_id: i64,
    #[serde(rename = "trafficlight")]
    #[serde(deserialize_with = "null_as_default")]
    pub traffic_light: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub toll: i64,
    #[serde(rename = "travelDesc")]
    #[serde(deserialize_with = "null_as_default")]
    pub travel_desc: Vec<TravelSegment>,
    #[serde(rename = "uidInfo")]
    #[serde(deserialize_with = "null_as_default")]
    pub uid_info: Vec<SpeedZoneRecord>,
}

/// One travel segment of a route; becomes one step of the output leg.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelSegment {
    #[serde(deserialize_with = "null_as_default")]
    pub part_distance: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub x: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub y: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub travel_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub road_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub road_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub next_road_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub next_road_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub direction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub part_desc: String,
    #[serde(rename = "shapepoint")]
    #[serde(deserialize_with = "null_as_default")]
    pub shapepoint: String,
}

/// A labelled two-point road span with per-vehicle-class speed limits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeedZoneRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub distance: i64,
    #[serde(rename = "carspeedlimit")]
    #[serde(deserialize_with = "null_as_default")]
    pub car_speed_limit: i64,
    #[serde(rename = "tkspeedlimit")]
    #[serde(deserialize_with = "null_as_default")]
    pub truck_speed_limit: i64,
    #[serde(rename = "busspeedlimit")]
    #[serde(deserialize_with = "null_as_default")]
    pub bus_speed_limit: i64,
    #[serde(rename = "shapepoint")]
    #[serde(deserialize_with = "null_as_default")]
    pub shapepoint: String,
}

// --- Careland route plan request ---

#[derive(Debug, Clone, Serialize)]
pub struct RoutePlanParams {
    pub origin: InternalXY,
    pub destinations: Vec<InternalXY>,
    pub condition: Condition,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InternalXY {
    pub x: i64,
    pub y: i64,
}

impl From<InternalPoint> for InternalXY {
    fn from(p: InternalPoint) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Condition {
    pub plan: u32,
}

impl RoutePlanParams {
    pub fn new(origin: InternalPoint, destination: InternalPoint, plan: u32) -> Self {
        Self {
            origin: origin.into(),
            destinations: vec![destination.into()],
            condition: Condition { plan },
        }
    }
}

// --- Careland geoconv response ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoconvResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub result: Vec<[String; 2]>,
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub error_message: String,
}

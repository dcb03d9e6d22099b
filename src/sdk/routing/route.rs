use super::assembler::{assemble_route, ProviderResolver};
use super::coords::{CoordSystem, InternalPoint, LngLat};
use super::datum::{DatumShift, Gcj02};
use super::directions::{DirectionsResponse, Waypoint};
use super::error::RoutingError;
use super::service::RouteProvider;

/// Start and end of a directions request, in WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointPair {
    pub start: LngLat,
    pub end: LngLat,
}

impl WaypointPair {
    /// Parses the coordinate segment of a directions path,
    /// `lng,lat;lng,lat[;...]`. Only the first and last entries are used;
    /// empty entries from stray separators are ignored.
    pub fn from_path(coordinates: &str) -> Result<Self, RoutingError> {
        let entries: Vec<&str> = coordinates
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if entries.len() < 2 {
            return Err(RoutingError::MalformedRequestPath(format!(
                "need at least two coordinates, got \"{}\"",
                coordinates
            )));
        }
        Ok(Self {
            start: LngLat::parse_path_entry(entries[0])?,
            end: LngLat::parse_path_entry(entries[entries.len() - 1])?,
        })
    }
}

/// Answers directions requests by fetching a provider route plan and
/// converting it.
pub struct DirectionsService {
    provider: Box<dyn RouteProvider>,
    datum: Box<dyn DatumShift>,
}

impl DirectionsService {
    pub fn new(provider: Box<dyn RouteProvider>) -> Self {
        Self::with_datum(provider, Box::new(Gcj02))
    }

    pub fn with_datum(provider: Box<dyn RouteProvider>, datum: Box<dyn DatumShift>) -> Self {
        Self { provider, datum }
    }

    pub fn directions_for_path(&self, coordinates: &str) -> Result<DirectionsResponse, RoutingError> {
        self.directions(WaypointPair::from_path(coordinates)?)
    }

    pub fn directions(&self, waypoints: WaypointPair) -> Result<DirectionsResponse, RoutingError> {
        let (origin, destination) = self.to_internal(waypoints)?;

        let mut plan = self.provider.route_plan(origin, destination)?;
        plan.inject_origin(origin);

        let resolver = ProviderResolver::new(self.provider.as_ref(), self.datum.as_ref());
        let route = assemble_route(&plan, &resolver)?;
        log::info!(
            "Converted route {} -> {}: {} step(s), {} m, {} s",
            waypoints.start,
            waypoints.end,
            route.legs.first().map(|l| l.steps.len()).unwrap_or(0),
            route.distance,
            route.duration
        );

        Ok(DirectionsResponse::new(
            route,
            vec![Waypoint::at(waypoints.start), Waypoint::at(waypoints.end)],
        ))
    }

    fn to_internal(&self, waypoints: WaypointPair) -> Result<(InternalPoint, InternalPoint), RoutingError> {
        let converted = self.provider.convert_coordinates(
            &[waypoints.start.to_string(), waypoints.end.to_string()],
            CoordSystem::Wgs84,
            CoordSystem::Internal,
        )?;
        match converted.as_slice() {
            [start, end, ..] => Ok((
                InternalPoint::from_converted(start)?,
                InternalPoint::from_converted(end)?,
            )),
            _ => Err(RoutingError::InvalidCoordinate(format!(
                "expected two converted endpoints, got {}",
                converted.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_entries_are_used() {
        let pair = WaypointPair::from_path("113.9,22.5;113.95,22.55;114.0,22.6").unwrap();
        assert_eq!(pair.start, LngLat::new(113.9, 22.5));
        assert_eq!(pair.end, LngLat::new(114.0, 22.6));
    }

    #[test]
    fn stray_separators_are_ignored() {
        let pair = WaypointPair::from_path("113.9,22.5;114.0,22.6;").unwrap();
        assert_eq!(pair.end, LngLat::new(114.0, 22.6));
        let pair = WaypointPair::from_path(";113.9,22.5;;114.0,22.6").unwrap();
        assert_eq!(pair.start, LngLat::new(113.9, 22.5));
    }

    #[test]
    fn trailing_separator_does_not_make_a_second_coordinate() {
        let err = WaypointPair::from_path("113.9,22.5;").unwrap_err();
        assert!(matches!(err, RoutingError::MalformedRequestPath(_)));
    }

    #[test]
    fn single_coordinate_is_malformed() {
        let err = WaypointPair::from_path("113.9,22.5").unwrap_err();
        assert!(matches!(err, RoutingError::MalformedRequestPath(_)));
    }

    #[test]
    fn unparseable_axis_is_malformed() {
        let err = WaypointPair::from_path("113.9,north;114.0,22.6").unwrap_err();
        assert!(matches!(err, RoutingError::MalformedRequestPath(_)));
    }
}

use super::error::RoutingError;
use std::fmt;

/// Coordinate system codes understood by the provider's `geoconv` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordSystem {
    /// The provider's fixed-point internal unit.
    Internal,
    Wgs84,
    Gcj02,
}

impl CoordSystem {
    pub fn code(&self) -> u8 {
        match self {
            CoordSystem::Internal => 0,
            CoordSystem::Wgs84 => 1,
            CoordSystem::Gcj02 => 2,
        }
    }
}

/// A longitude/latitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Parses a `"lng,lat"` entry taken from a request path.
    pub fn parse_path_entry(entry: &str) -> Result<Self, RoutingError> {
        let mut parts = entry.split(',');
        let (Some(lng), Some(lat)) = (parts.next(), parts.next()) else {
            return Err(RoutingError::MalformedRequestPath(format!(
                "expected \"lng,lat\", got \"{}\"",
                entry
            )));
        };
        let parse = |axis: &str| {
            axis.trim().parse::<f64>().map_err(|e| {
                RoutingError::MalformedRequestPath(format!("bad axis \"{}\" in \"{}\": {}", axis, entry, e))
            })
        };
        Ok(Self::new(parse(lng)?, parse(lat)?))
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// A point in the provider's internal unit, as carried in route requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalPoint {
    pub x: i64,
    pub y: i64,
}

impl InternalPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Reads a `geoconv` result pair that is expected to hold integers.
    pub fn from_converted(pair: &[String; 2]) -> Result<Self, RoutingError> {
        let parse = |axis: &str| {
            axis.trim()
                .parse::<i64>()
                .map_err(|_| RoutingError::InvalidCoordinate(format!("[{}, {}]", pair[0], pair[1])))
        };
        Ok(Self::new(parse(&pair[0])?, parse(&pair[1])?))
    }
}

/// A shape-point token compared against speed zones. The provider's unit is
/// read at single precision and widened, so comparisons round the same way
/// the upstream data was produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapePoint {
    pub lng: f64,
    pub lat: f64,
}

impl ShapePoint {
    /// Parses `"lng,lat"`. Tokens that do not split into two parts read as
    /// the origin; an unparseable axis reads as zero.
    pub fn parse_or_origin(token: &str) -> Self {
        let parts: Vec<&str> = token.split(',').collect();
        if parts.len() != 2 {
            return Self::default();
        }
        Self {
            lng: parse_single(parts[0]),
            lat: parse_single(parts[1]),
        }
    }
}

fn parse_single(axis: &str) -> f64 {
    axis.parse::<f32>().map(f64::from).unwrap_or(0.0)
}

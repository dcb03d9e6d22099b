use super::coords::ShapePoint;
use super::directions::MaxSpeed;
use super::provider::types::SpeedZoneRecord;

/// Speed zone with its endpoints already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedZone {
    pub start: ShapePoint,
    pub end: ShapePoint,
    pub car_speed_limit: i64,
}

impl SpeedZone {
    /// Returns `None` unless the shape string holds exactly two endpoints.
    pub fn from_record(record: &SpeedZoneRecord) -> Option<Self> {
        let endpoints: Vec<&str> = record.shapepoint.split(';').collect();
        if endpoints.len() != 2 {
            return None;
        }
        Some(Self {
            start: ShapePoint::parse_or_origin(endpoints[0]),
            end: ShapePoint::parse_or_origin(endpoints[1]),
            car_speed_limit: record.car_speed_limit,
        })
    }

    /// Bounding-interval test anchored at the start endpoint: the point may be
    /// no further from the start, on each axis, than the end is.
    pub fn contains(&self, point: ShapePoint) -> bool {
        (point.lng - self.start.lng).abs() <= (self.start.lng - self.end.lng).abs()
            && (point.lat - self.start.lat).abs() <= (self.start.lat - self.end.lat).abs()
    }
}

pub fn parse_speed_zones(records: &[SpeedZoneRecord]) -> Vec<SpeedZone> {
    records.iter().filter_map(SpeedZone::from_record).collect()
}

/// Car speed limit (km/h) of the first zone in provider order containing the
/// point, or 0 when none does. First match wins even if a later zone fits
/// tighter.
pub fn match_speed_limit(point: ShapePoint, zones: &[SpeedZone]) -> i64 {
    zones
        .iter()
        .find(|zone| zone.contains(point))
        .map(|zone| zone.car_speed_limit)
        .unwrap_or(0)
}

/// Leg-wide max speed annotation, filled as coordinates are produced.
///
/// Each push closes a single-element hole against its predecessor: an unknown
/// (0) followed by a known value takes that value, and an unknown following a
/// known value copies it forward. Index 0 is the first coordinate of the first
/// step, regardless of step boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaxSpeedSequence {
    speeds: Vec<f64>,
}

impl MaxSpeedSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw speed and returns the value stored for it after filling.
    pub fn push(&mut self, speed: f64) -> f64 {
        self.speeds.push(speed);
        let k = self.speeds.len() - 1;
        if k > 0 {
            let previous = self.speeds[k - 1];
            if previous == 0.0 && speed != 0.0 {
                self.speeds[k - 1] = speed;
            } else if previous != 0.0 && speed == 0.0 {
                self.speeds[k] = previous;
            }
        }
        self.speeds[k]
    }

    pub fn into_annotation(self) -> Vec<MaxSpeed> {
        self.speeds.into_iter().map(MaxSpeed::kmh).collect()
    }
}

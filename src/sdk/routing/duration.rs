/// Speeds at or below this (km/h) are treated as unusable for timing.
const MIN_USABLE_SPEED_KMH: f64 = 1.0;

/// Seconds to cover `distance_m` at `speed_kmh`, if the speed is usable.
pub fn travel_time(distance_m: f64, speed_kmh: f64) -> Option<f64> {
    (speed_kmh > MIN_USABLE_SPEED_KMH).then(|| distance_m / (speed_kmh / 3.6))
}

/// Running duration estimate for one step.
///
/// Starts at the route's total time and is recomputed from every coordinate
/// with a usable speed, so the stored value reflects the last such coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationEstimate {
    distance_m: f64,
    seconds: f64,
}

impl DurationEstimate {
    pub fn new(distance_m: f64, fallback_seconds: f64) -> Self {
        Self {
            distance_m,
            seconds: fallback_seconds,
        }
    }

    pub fn observe(&mut self, speed_kmh: f64) {
        if let Some(seconds) = travel_time(self.distance_m, speed_kmh) {
            self.seconds = seconds;
        }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

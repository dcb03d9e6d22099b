use super::coords::InternalPoint;

/// Splits a segment's shape-point string into `"lng,lat"` tokens, prefixed by
/// the segment origin. An empty shape string yields no tokens, which the
/// assembler reads as the provider truncating the route.
pub fn decode_shape_points(origin: InternalPoint, shapepoint: &str) -> Vec<String> {
    if shapepoint.is_empty() {
        return Vec::new();
    }
    format!("{},{};{}", origin.x, origin.y, shapepoint)
        .split(';')
        .map(str::to_string)
        .collect()
}

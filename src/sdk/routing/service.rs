use super::coords::{CoordSystem, InternalPoint};
use super::error::RoutingError;
use super::provider::types::RoutePlanResponse;

pub trait RouteProvider: Send + Sync {
    /// Fetches a driving route plan between two points in the provider's
    /// internal unit.
    fn route_plan(
        &self,
        origin: InternalPoint,
        destination: InternalPoint,
    ) -> Result<RoutePlanResponse, RoutingError>;

    /// Converts `"lng,lat"` tokens between coordinate systems. The result is
    /// positionally aligned with `coords`; an axis the provider could not
    /// convert comes back as an empty string.
    fn convert_coordinates(
        &self,
        coords: &[String],
        from: CoordSystem,
        to: CoordSystem,
    ) -> Result<Vec<[String; 2]>, RoutingError>;
}

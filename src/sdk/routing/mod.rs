pub mod assembler;
pub mod coords;
pub mod datum;
pub mod directions;
pub mod duration;
pub mod error;
pub mod provider;
pub mod route;
pub mod service;
pub mod shape;
pub mod speed_limit;

pub use assembler::{assemble_route, CoordinateResolver, ProviderResolver};
pub use coords::{CoordSystem, InternalPoint, LngLat};
pub use datum::{DatumShift, Gcj02, Identity};
pub use directions::DirectionsResponse;
pub use error::RoutingError;
pub use provider::RemoteCarelandProvider;
pub use route::{DirectionsService, WaypointPair};
pub use service::RouteProvider;

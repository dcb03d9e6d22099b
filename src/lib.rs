pub mod sdk;

pub use sdk::config::BridgeConfig;
pub use sdk::routing::directions::DirectionsResponse;
pub use sdk::routing::route::DirectionsService;
pub use sdk::routing::service::RouteProvider;
pub use sdk::routing::RoutingError;

pub mod config;
pub mod routing;
pub mod server;
pub mod util;

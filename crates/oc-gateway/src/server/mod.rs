//! HTTP server for the gateway

mod dispatch;
mod listener;
mod overrides;
mod signal;

pub use dispatch::build_router;
pub use listener::GatewayServer;
pub use overrides::ServeOverrides;
pub use signal::spawn_signal_handler;

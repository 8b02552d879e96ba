//! oc-gateway: Local gateway daemon serving device pairing payloads
//!
//! The gateway exposes `GET /api/pairing/qr`, which hands a remote control
//! client a deep link (and its QR code) carrying everything needed to
//! connect: reachable host, port, TLS flag and the configured secrets.
//! The pairing gate only discloses it to same-machine callers or to
//! callers that pass the gateway's authorization policy.

pub mod auth;
pub mod error;
pub mod http;
pub mod pairing;
pub mod qr;
pub mod server;
pub mod state;

pub use error::GatewayError;
pub use server::{build_router, GatewayServer, ServeOverrides};
pub use state::GatewayState;

//! Core trait definitions
//!
//! Seams for the collaborators the pairing gate consumes but does not own.

mod authorize;
mod render;

pub use authorize::GatewayAuthorizer;
pub use render::QrRenderer;

pub use crate::net::LanAddressSource;

//! Shared gateway state
//!
//! A read-only snapshot of the configuration plus the collaborators the
//! pairing gate consults. Cloning is cheap; every request sees the same
//! values for the lifetime of the process.

use std::sync::Arc;

use oc_core::auth::AuthConfig;
use oc_core::config::GatewayConfig;
use oc_core::net::SystemLanAddress;
use oc_core::traits::{GatewayAuthorizer, LanAddressSource, QrRenderer};

use crate::auth::ConfigAuthorizer;
use crate::qr::PngQrRenderer;

/// State available to every request handler
#[derive(Clone)]
pub struct GatewayState {
    config: Arc<GatewayConfig>,
    authorizer: Arc<dyn GatewayAuthorizer>,
    renderer: Arc<dyn QrRenderer>,
    lan: Arc<dyn LanAddressSource>,
}

impl GatewayState {
    /// Create state with the default collaborators
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config: Arc::new(config),
            authorizer: Arc::new(ConfigAuthorizer::new()),
            renderer: Arc::new(PngQrRenderer::new()),
            lan: Arc::new(SystemLanAddress),
        }
    }

    /// Replace the authorization backend
    pub fn with_authorizer(mut self, authorizer: Arc<dyn GatewayAuthorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Replace the QR renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn QrRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the LAN address source
    pub fn with_lan_source(mut self, lan: Arc<dyn LanAddressSource>) -> Self {
        self.lan = lan;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.config.auth
    }

    pub fn trusted_proxies(&self) -> &[String] {
        &self.config.trusted_proxies
    }

    pub fn authorizer(&self) -> &dyn GatewayAuthorizer {
        self.authorizer.as_ref()
    }

    pub fn renderer(&self) -> &dyn QrRenderer {
        self.renderer.as_ref()
    }

    pub fn lan(&self) -> &dyn LanAddressSource {
        self.lan.as_ref()
    }
}

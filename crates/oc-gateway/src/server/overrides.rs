//! Command-line overrides for the gateway config

use oc_core::config::GatewayConfig;
use oc_core::error::ConfigError;

/// Values given on the command line that take precedence over the config file
#[derive(Debug, Default, Clone)]
pub struct ServeOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub token: Option<String>,
    pub password: Option<String>,
}

impl ServeOverrides {
    /// Apply the overrides to `config` and validate the result
    pub fn apply(self, config: &mut GatewayConfig) -> Result<(), ConfigError> {
        if let Some(bind) = self.bind {
            config.bind_host = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(token) = self.token {
            config.auth.token = Some(token);
        }
        if let Some(password) = self.password {
            config.auth.password = Some(password);
        }
        config.validate()
    }
}

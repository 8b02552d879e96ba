//! CLI command implementations

mod config;
mod pair;
mod serve;
mod token;

pub use config::{config_init, config_path, config_show, load_gateway_config, resolve_config_path};
pub use pair::pair_command;
pub use serve::serve_command;
pub use token::token_rotate;

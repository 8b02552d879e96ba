//! openclaw: Command-line interface for the OpenClaw gateway
//!
//! Provides the `openclaw` CLI for running the gateway, printing pairing
//! links on the local machine and managing the gateway configuration.

pub mod commands;
pub mod output;

pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::{BridgeConfig, ConfigError};
pub use frameworks::server::{RunningBridge, run, run_with_config, sandbox_world, spawn_bridge};

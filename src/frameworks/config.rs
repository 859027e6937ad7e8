use crate::domain::camera::ChaseRig;
use crate::domain::snapshot::MAX_SCAN_EXTENT;
use crate::use_cases::{BridgeSettings, Cadence, CameraSettings};
use serde::Deserialize;
use std::{env, fmt, fs, io, path::Path, str::FromStr, time::Duration};
use url::Url;

// Runtime configuration: defaults, then an optional TOML file, then env overrides.

/// Env var naming the optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "BRIDGE_CONFIG";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: io::Error },
    Parse(String),
    InvalidUrl { url: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            ConfigError::Parse(message) => write!(f, "invalid config: {message}"),
            ConfigError::InvalidUrl { url, reason } => {
                write!(f, "invalid service url '{url}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for io::Error {
    fn from(e: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    }
}

/// Every tunable of the bridge process. Missing TOML keys keep their default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub service_url: String,
    pub request_timeout_ms: u64,
    pub tick_ms: u64,
    pub queue_capacity: usize,
    pub voxel_radius: u32,
    pub voxel_half_height: u32,
    pub sense_interval_ticks: u64,
    pub report_interval_ticks: u64,
    pub move_poll_interval_ticks: u64,
    pub legacy_pull_interval_ticks: u64,
    pub command_poll_interval_ticks: u64,
    pub camera_interval_ticks: u64,
    pub camera_switch_after: u32,
    pub camera_distance: f64,
    pub camera_height: f64,
    pub camera_ease_seconds: f64,
    pub control_tag: String,
    pub sensor_tag: String,
    pub camera_tag: String,
    pub ghost_tag: String,
    pub unmute_item: String,
    pub item_cooldown_ms: u64,
    /// Loaded half-extent of the sandbox world, in blocks.
    pub sandbox_radius: i32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8080".to_string(),
            request_timeout_ms: 2000,
            tick_ms: 50,
            queue_capacity: 256,
            voxel_radius: 4,
            voxel_half_height: 3,
            sense_interval_ticks: 10,
            report_interval_ticks: 20,
            move_poll_interval_ticks: 4,
            legacy_pull_interval_ticks: 20,
            command_poll_interval_ticks: 20,
            camera_interval_ticks: 1,
            camera_switch_after: 200,
            camera_distance: 10.0,
            camera_height: 5.0,
            camera_ease_seconds: 0.5,
            control_tag: "ai_bot".to_string(),
            sensor_tag: "ai_sensor".to_string(),
            camera_tag: "cameraman".to_string(),
            ghost_tag: "ghost".to_string(),
            unmute_item: "minecraft:amethyst_shard".to_string(),
            item_cooldown_ms: 500,
            sandbox_radius: 128,
        }
    }
}

impl BridgeConfig {
    /// Builds the process config from `BRIDGE_CONFIG` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies overrides from `lookup`; values that fail to parse are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AI_SERVICE_URL") {
            self.service_url = url;
        }
        parse_into(&mut self.request_timeout_ms, lookup("AI_REQUEST_TIMEOUT_MS"));
        parse_into(&mut self.tick_ms, lookup("BRIDGE_TICK_MS"));
        parse_into(&mut self.queue_capacity, lookup("BRIDGE_QUEUE_CAPACITY"));
        parse_into(&mut self.voxel_radius, lookup("VOXEL_RADIUS"));
        parse_into(&mut self.voxel_half_height, lookup("VOXEL_HALF_HEIGHT"));
        parse_into(&mut self.sense_interval_ticks, lookup("SENSE_INTERVAL_TICKS"));
        parse_into(&mut self.report_interval_ticks, lookup("REPORT_INTERVAL_TICKS"));
        parse_into(
            &mut self.move_poll_interval_ticks,
            lookup("MOVE_POLL_INTERVAL_TICKS"),
        );
        parse_into(
            &mut self.legacy_pull_interval_ticks,
            lookup("LEGACY_PULL_INTERVAL_TICKS"),
        );
        parse_into(
            &mut self.command_poll_interval_ticks,
            lookup("COMMAND_POLL_INTERVAL_TICKS"),
        );
        parse_into(&mut self.camera_interval_ticks, lookup("CAMERA_INTERVAL_TICKS"));
        parse_into(&mut self.camera_switch_after, lookup("CAMERA_SWITCH_TICKS"));
        parse_into(&mut self.camera_distance, lookup("CAMERA_DISTANCE"));
        parse_into(&mut self.camera_height, lookup("CAMERA_HEIGHT"));
        parse_into(&mut self.camera_ease_seconds, lookup("CAMERA_EASE_SECONDS"));
        parse_into(&mut self.item_cooldown_ms, lookup("ITEM_COOLDOWN_MS"));
        parse_into(&mut self.sandbox_radius, lookup("SANDBOX_RADIUS"));
        for (slot, key) in [
            (&mut self.control_tag, "CONTROL_TAG"),
            (&mut self.sensor_tag, "SENSOR_TAG"),
            (&mut self.camera_tag, "CAMERA_TAG"),
            (&mut self.ghost_tag, "GHOST_TAG"),
            (&mut self.unmute_item, "UNMUTE_ITEM"),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.service_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.service_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.service_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Bounded queues need room for at least one message.
    pub fn channel_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }

    pub fn to_settings(&self) -> BridgeSettings {
        BridgeSettings {
            // A zero period would make the tick interval panic.
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            voxel_radius: self.voxel_radius.min(MAX_SCAN_EXTENT),
            voxel_half_height: self.voxel_half_height.min(MAX_SCAN_EXTENT),
            sense_interval: Cadence(self.sense_interval_ticks),
            report_interval: Cadence(self.report_interval_ticks),
            move_poll_interval: Cadence(self.move_poll_interval_ticks),
            legacy_pull_interval: Cadence(self.legacy_pull_interval_ticks),
            command_poll_interval: Cadence(self.command_poll_interval_ticks),
            control_tag: self.control_tag.clone(),
            sensor_tag: self.sensor_tag.clone(),
            ghost_tag: self.ghost_tag.clone(),
            unmute_item: self.unmute_item.clone(),
            item_cooldown: Duration::from_millis(self.item_cooldown_ms),
            camera: CameraSettings {
                interval: Cadence(self.camera_interval_ticks),
                switch_after: self.camera_switch_after,
                operator_tag: self.camera_tag.clone(),
                rig: ChaseRig {
                    distance: self.camera_distance,
                    height: self.camera_height,
                    ease_seconds: self.camera_ease_seconds,
                },
            },
        }
    }
}

fn parse_into<T: FromStr>(slot: &mut T, value: Option<String>) {
    if let Some(parsed) = value.and_then(|v| v.trim().parse().ok()) {
        *slot = parsed;
    }
}

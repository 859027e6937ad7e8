// Framework bootstrap for the bridge runtime.

use crate::domain::{Vec3, WorldPort};
use crate::frameworks::config::BridgeConfig;
use crate::interface_adapters::clients::AiServiceClient;
use crate::interface_adapters::net::outbound_task;
use crate::interface_adapters::sandbox::{GROUND_Y, SandboxWorld};
use crate::interface_adapters::utils::SystemClock;
use crate::use_cases::{Bridge, EngineEvent, Outbox, bridge_task};

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;

/// Log filter used when `RUST_LOG` is unset: the bridge at info, its HTTP stack quieter.
const DEFAULT_LOG_FILTER: &str = "info,reqwest=warn,hyper_util=warn";

fn init_tracing() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json")) {
        builder.json().with_current_span(true).init();
    } else {
        builder.compact().init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "bridge panicked");
    }));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sim-bridge starting");
}

/// A bridge loop running against some engine adapter.
pub struct RunningBridge<W> {
    /// Engine notifications go here.
    pub events: mpsc::Sender<EngineEvent>,
    shutdown: Arc<Notify>,
    task: JoinHandle<(Bridge, W)>,
}

impl<W> RunningBridge<W> {
    /// Stops the tick loop and hands the engine adapter back.
    pub async fn stop(self) -> Result<W> {
        self.shutdown.notify_one();
        let (_bridge, world) = self.task.await.map_err(|e| {
            tracing::error!(error = %e, "bridge task failed");
            std::io::Error::other(format!("bridge task failed: {e}"))
        })?;
        Ok(world)
    }
}

/// Wires the service client, outbound task and tick loop around `world`.
pub fn spawn_bridge<W>(config: &BridgeConfig, world: W) -> Result<RunningBridge<W>>
where
    W: WorldPort + Send + 'static,
{
    let client = AiServiceClient::new(config.service_url.clone(), config.request_timeout())
        .map_err(|e| std::io::Error::other(format!("failed to initialize ai client: {e}")))?;
    tracing::debug!(
        service_url = %client.base_url(),
        request_timeout_ms = config.request_timeout_ms,
        "ai service client configured"
    );

    // outbox -> outbound task: requests issued by the bridge.
    // reply_tx -> bridge: decoded replies, applied on the next tick.
    // event_tx -> bridge: engine notifications.
    let capacity = config.channel_capacity();
    let (outbox, outbound_rx) = Outbox::channel(capacity);
    let (reply_tx, reply_rx) = mpsc::channel(capacity);
    let (event_tx, event_rx) = mpsc::channel(capacity);

    tokio::spawn(outbound_task(outbound_rx, Arc::new(client), reply_tx));

    let bridge = Bridge::new(
        config.to_settings(),
        outbox,
        Arc::new(SystemClock),
        StdRng::from_entropy(),
    );
    let shutdown = Arc::new(Notify::new());
    let task = tokio::spawn(bridge_task(
        bridge,
        world,
        event_rx,
        reply_rx,
        shutdown.clone(),
    ));

    Ok(RunningBridge {
        events: event_tx,
        shutdown,
        task,
    })
}

/// Flat sandbox world with one controlled, sensing bot at the origin.
pub fn sandbox_world(config: &BridgeConfig) -> SandboxWorld {
    let mut world = SandboxWorld::new(config.sandbox_radius);
    world.spawn_actor(
        "bot-1",
        "AI_Bot",
        Vec3::new(0.5, GROUND_Y as f64, 0.5),
        &[config.control_tag.as_str(), config.sensor_tag.as_str()],
    );
    world
}

/// Runs the bridge against the sandbox world until Ctrl-C.
pub async fn run(config: BridgeConfig) -> Result<()> {
    let bridge = spawn_bridge(&config, sandbox_world(&config))?;
    tracing::info!(
        service_url = %config.service_url,
        tick_ms = config.tick_ms,
        "bridge running"
    );

    tokio::signal::ctrl_c().await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    })?;
    tracing::info!("shutdown requested");

    bridge.stop().await?;
    Ok(())
}

pub async fn run_with_config() -> Result<()> {
    init_tracing();

    let config = BridgeConfig::load().inspect_err(|e| {
        tracing::error!(error = %e, "failed to load config");
    })?;

    run(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_rust_log_is_unset_then_default_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn when_sandbox_world_is_built_then_bot_carries_control_and_sensor_tags() {
        let config = BridgeConfig {
            control_tag: "npc".to_string(),
            ..BridgeConfig::default()
        };

        let world = sandbox_world(&config);

        let bot = world.actor("bot-1").expect("bot spawned");
        assert_eq!(bot.name, "AI_Bot");
        assert!(bot.has_tag("npc"));
        assert!(bot.has_tag("ai_sensor"));
        assert_eq!(bot.location, Vec3::new(0.5, 64.0, 0.5));
    }
}

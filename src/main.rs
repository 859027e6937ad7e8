#[tokio::main]
async fn main() -> std::io::Result<()> {
    sim_bridge::run_with_config().await
}

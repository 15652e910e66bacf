fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .env()
        .init()
        .expect("failed to build logger instance");

    let channels = sayboard_bridge::BridgeChannels::default();
    sayboard_backend::run(channels.backend_rx, channels.backend_tx);
    sayboard_frontend::run(channels.frontend_rx, channels.frontend_tx)
}

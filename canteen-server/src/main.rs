use canteen_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Log directory must exist before the rolling appender opens it
    std::fs::create_dir_all(&config.log_dir).ok();
    init_logger(&config.log_level, Some(&config.log_dir));

    print_banner();

    tracing::info!("Canteen server starting...");

    let state = ServerState::initialize(&config).await?;

    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

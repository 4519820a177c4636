use hub_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;

    print_banner();

    tracing::info!("Comal Hub Server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state
    let state = ServerState::initialize(&config).await;

    // 4. Run the HTTP server (starts background tasks)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

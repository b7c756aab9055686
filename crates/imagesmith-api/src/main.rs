use imagesmith_core::Config;

// Use mimalloc as the global allocator; decode and resize churn through large buffers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    imagesmith_api::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let (_state, router) = imagesmith_api::setup::initialize_app(config.clone())?;

    imagesmith_api::setup::server::start_server(&config, router).await?;

    Ok(())
}

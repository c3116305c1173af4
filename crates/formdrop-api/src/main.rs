use formdrop_api::setup;
use formdrop_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under upload-heavy load,
// especially on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, router) = setup::initialize_app(config.clone())?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}

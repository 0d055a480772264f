use company_core::config::{Config, DEFAULT_CONFIG_FILE};
use company_core::db::open_pool;
use company_core::router::{CoreState, core_router};
use company_core::service::bootstrap::run_startup;
use mimalloc::MiMalloc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_LOGLEVEL: &str = "info";

fn init_tracing(loglevel: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Any failure before the listener is bound ends the process with a non-zero exit.
    let cfg_path = std::env::var_os("CORE_CONFIG").map(PathBuf::from);
    let cfg = match Config::load(cfg_path.as_deref()) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            init_tracing(DEFAULT_LOGLEVEL);
            error!(
                path = %cfg_path.as_deref().unwrap_or(Path::new(DEFAULT_CONFIG_FILE)).display(),
                error = %e,
                "configuration file error"
            );
            return Err(e.into());
        }
    };
    init_tracing(&cfg.loglevel);

    info!("preparing to start core");
    info!("reading configuration");
    for (key, value) in cfg.diagnostic_fields() {
        info!(key, value = %value, "configuration");
    }
    info!("reading configuration done");

    let pool = open_pool(&cfg.database_url).await?;
    let report = run_startup(&cfg, &pool).await?;
    info!(installed = report.installed(), "core started");

    let app = core_router(CoreState::new(pool));

    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

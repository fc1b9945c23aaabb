//! Composition root: wires config, store, remote client, and connectivity
//! probe into the cache coordinator, with explicit constructor injection
//! throughout.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shelf_cache::{HttpProbe, ProductCacheCoordinator};
use shelf_core::{CacheState, ProductPage};
use shelf_remote::CatalogClient;
use shelf_store::{PoolConfig, ProductStore};

#[derive(Debug, Parser)]
#[command(name = "shelf")]
#[command(about = "Offline-first product catalog cache")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one page, preferring the network and falling back to the cache.
    Fetch {
        /// Offset of the requested page.
        #[arg(long, default_value_t = 0)]
        skip: i64,
        /// Page size; defaults to the configured page limit.
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Page through the catalog from the top, like a browsing session.
    Browse {
        /// Maximum number of pages to load, refresh included.
        #[arg(long, default_value_t = 3)]
        pages: u32,
    },
    /// Empty the local cache.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = shelf_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let pool = shelf_store::connect_pool(&config.database_url, PoolConfig::from_env()).await?;
    shelf_store::run_migrations(&pool).await?;
    let store = ProductStore::new(pool);
    match cli.command {
        Commands::Fetch { skip, limit } => {
            let coordinator = build_coordinator(&config, store)?;
            let limit = limit.unwrap_or(config.page_limit);
            let page = coordinator.fetch_page(skip, limit).await?;
            print_page(&page);
        }
        Commands::Browse { pages } => {
            let coordinator = build_coordinator(&config, store)?;
            browse(&coordinator, config.page_limit, pages).await?;
        }
        Commands::Clear => {
            store.clear().await?;
            println!("cache cleared");
        }
    }

    Ok(())
}

fn build_coordinator(
    config: &shelf_core::AppConfig,
    store: ProductStore,
) -> anyhow::Result<ProductCacheCoordinator<CatalogClient, ProductStore, HttpProbe>> {
    let remote = CatalogClient::new(&config.api_base_url, config.request_timeout_secs)?;
    let probe = HttpProbe::new(&config.probe_url, config.probe_timeout_secs)?;
    Ok(ProductCacheCoordinator::new(remote, store, probe))
}

async fn browse(
    coordinator: &ProductCacheCoordinator<CatalogClient, ProductStore, HttpProbe>,
    limit: i64,
    pages: u32,
) -> anyhow::Result<()> {
    let mut state = CacheState::new(limit);
    if pages == 0 {
        return Ok(());
    }

    let request = state.refresh_request();
    let page = coordinator.fetch_page(request.skip, request.limit).await?;
    state.record_refresh(&page);
    print_page(&page);

    for _ in 1..pages {
        // Exhausted catalogs issue no further requests.
        let Some(request) = state.next_request() else {
            break;
        };
        let page = coordinator.fetch_page(request.skip, request.limit).await?;
        state.record_page(&page);
        print_page(&page);
    }

    println!(
        "loaded {} of {} products{}",
        state.loaded().len(),
        state.total().unwrap_or(0),
        if state.has_more() { " (more available)" } else { "" },
    );
    Ok(())
}

fn print_page(page: &ProductPage) {
    println!(
        "page skip={} limit={} ({} products, total {})",
        page.skip,
        page.limit,
        page.len(),
        page.total
    );
    for product in &page.products {
        println!(
            "  {:>6}  {:<40}  {:>8}  (now {})",
            product.id,
            product.title,
            product.price,
            product.discounted_price().round_dp(2)
        );
    }
}

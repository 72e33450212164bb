//! Picker binary entry point
//!
//! A terminal shell over the picker: runs one search, pulls the requested
//! number of pages, selects the given products and prints the resulting
//! product rows.

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, bail};
use clap::Parser;

use shared::logging::{init_tracing, log_error, log_startup, log_success};
use shared::{ProductId, VariantRef};
use picker::{
    CatalogEndpoint, CatalogSearchProvider, DEFAULT_PAGE_SIZE, PageDispatch, PickerConfig, ProductRows, QueryStyle,
    SearchSelectionController, VariantToggle,
    services::{HttpCatalogProvider, StaticCatalogProvider},
};

#[derive(Parser)]
#[command(name = "picker")]
#[command(about = "Search a product catalog and bind the picks to product rows")]
struct Args {
    /// Catalog base URL (the search endpoint is `<url>/products/search`)
    #[arg(long, env = "PICKER_CATALOG_URL", default_value = "https://dummyjson.com")]
    catalog_url: String,

    /// API key sent as `x-api-key`
    #[arg(long, env = "PICKER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// How page requests are spelled
    #[arg(long, value_enum, env = "PICKER_QUERY_STYLE", default_value_t = QueryStyle::Offset)]
    query_style: QueryStyle,

    /// Products per page
    #[arg(long, env = "PICKER_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Minimum spacing between searches, in milliseconds
    #[arg(long, env = "PICKER_THROTTLE_MS", default_value_t = 500)]
    throttle_ms: u64,

    /// Catalog request timeout, in seconds
    #[arg(long, env = "PICKER_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Log level for picker crates (RUST_LOG overrides)
    #[arg(long, env = "PICKER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Search the built-in sample catalog instead of the network
    #[arg(long)]
    offline: bool,

    /// JSON product array to use with --offline
    #[arg(long, requires = "offline")]
    catalog_file: Option<PathBuf>,

    /// Search text
    #[arg(long, default_value = "")]
    search: String,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// Product to select, as ID or ID:VARIANT[,VARIANT...] (`#id` names a variant by id)
    #[arg(long = "select", value_parser = parse_pick)]
    picks: Vec<Pick>,
}

#[derive(Clone, Debug)]
struct Pick {
    product: ProductId,
    variants: Vec<VariantRef>,
}

fn parse_pick(raw: &str) -> Result<Pick, String> {
    let (product, variants) = match raw.split_once(':') {
        Some((product, variants)) => (product, variants),
        None => (raw, ""),
    };
    if product.trim().is_empty() {
        return Err(format!("missing product id in '{raw}'"));
    }
    let variants = variants
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .filter_map(|v| v.parse().ok())
        .collect();
    Ok(Pick {
        product: ProductId::new(product.trim()),
        variants,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let config = PickerConfig::default()
        .with_page_size(args.page_size)
        .with_throttle_interval(Duration::from_millis(args.throttle_ms))
        .with_request_timeout(Duration::from_secs(args.timeout_secs));
    config.validate()?;

    if args.offline {
        let provider = match &args.catalog_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading catalog file {}", path.display()))?;
                StaticCatalogProvider::from_json(&json)
                    .with_context(|| format!("parsing catalog file {}", path.display()))?
            }
            None => StaticCatalogProvider::sample(),
        };
        log_startup("picker", &format!("offline catalog with {} products", provider.len()));
        run(provider, config, &args).await
    } else {
        let endpoint = CatalogEndpoint::parse(&args.catalog_url)?
            .with_api_key(args.api_key.clone())
            .with_query_style(args.query_style);
        let provider = HttpCatalogProvider::new(endpoint, config.request_timeout).context("building catalog client")?;
        log_startup("picker", &format!("catalog at {}", provider.search_url()));
        run(provider, config, &args).await
    }
}

async fn run<P>(provider: P, config: PickerConfig, args: &Args) -> anyhow::Result<()>
where
    P: CatalogSearchProvider + 'static,
{
    let mut rows = ProductRows::new(config.max_rows);
    let row = rows.rows()[0].id;
    rows.begin_edit(row)?;

    let mut controller = SearchSelectionController::new(provider, config)?;
    if args.search.is_empty() {
        controller.open();
    } else {
        controller.set_search_text(args.search.as_str());
    }
    controller.settle().await;

    for _ in 1..args.pages {
        match controller.load_next_page() {
            PageDispatch::Dispatched { .. } => {
                controller.settle().await;
            }
            _ => break,
        }
    }

    if let Some(error) = controller.last_error() {
        log_error("picker", "catalog search", error);
        bail!(error.clone());
    }

    println!("{} products for '{}' ({:?})", controller.results().len(), controller.query_text(), controller.status());
    for product in controller.results() {
        let variants: Vec<_> = product.variants.iter().map(|v| v.title.as_str()).collect();
        println!("{:>6}  {:<40} {}", product.id.as_str(), product.title, variants.join(", "));
    }

    for pick in &args.picks {
        controller
            .toggle_product_selected(&pick.product)
            .with_context(|| format!("selecting product {}", pick.product))?;
        if pick.variants.is_empty() {
            continue;
        }
        // Replace the seeded first variant with exactly the requested ones
        for seeded in controller.selected_variants(&pick.product).unwrap_or_default() {
            if !pick.variants.contains(&seeded.key()) {
                controller.toggle_variant_selected(&pick.product, &seeded.key());
            }
        }
        for variant in &pick.variants {
            if controller.is_variant_selected(&pick.product, variant) {
                continue;
            }
            if controller.toggle_variant_selected(&pick.product, variant) == VariantToggle::Ignored {
                tracing::warn!("Product {} has no variant {}", pick.product, variant);
            }
        }
    }

    if args.picks.is_empty() {
        controller.cancel(&mut rows);
    } else {
        controller.confirm(&mut rows);
        log_success("picker", &format!("{} product rows filled", rows.len()));
    }

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

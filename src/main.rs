//! Salon Admin CLI
//!
//! Fetches one page of an admin resource and prints the resulting store state as
//! JSON, falling back to the mock catalog exactly like the dashboard does.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use salon_admin::config::Config;
use salon_admin::models::{PageQuery, PageSize};
use salon_admin::store::{Resource, ResourceStore};
use salon_admin::AdminContext;

const USAGE: &str = "usage: salon-admin <salons|services|users|schools> [search] [page] [page-size|all]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(resource) = args.next() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let search = args.next().unwrap_or_default();
    let page = match args.next() {
        Some(raw) => raw.parse::<u32>().map_err(|_| format!("Invalid page: {:?}", raw))?,
        None => 1,
    };
    let page_size = match args.next() {
        Some(raw) => raw.parse::<PageSize>()?,
        None => PageSize::default(),
    };
    let query = PageQuery::new(page, page_size, search);

    tracing::info!("API base URL: {}", config.api_base_url);

    let context = AdminContext::from_config(config)?;

    let output = match resource.as_str() {
        "salons" => print_page(&context.salons, query).await?,
        "services" => print_page(&context.services, query).await?,
        "users" => print_page(&context.users, query).await?,
        "schools" => print_page(&context.schools, query).await?,
        other => {
            eprintln!("Unknown resource {:?}\n{}", other, USAGE);
            std::process::exit(2);
        }
    };
    println!("{}", output);

    context.dispose();
    Ok(())
}

async fn print_page<R: Resource>(
    store: &Arc<ResourceStore<R>>,
    query: PageQuery,
) -> Result<String, serde_json::Error> {
    let outcome = store.fetch(query).await;
    let snapshot = store.snapshot();
    let active = snapshot.records.iter().filter(|r| r.is_active()).count();
    tracing::info!(
        "Fetched {}: {:?} ({} of {} active, {:?} fallback)",
        R::ENDPOINT,
        outcome,
        active,
        snapshot.records.len(),
        store.policy()
    );
    serde_json::to_string_pretty(&snapshot)
}

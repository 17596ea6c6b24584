//! advisor-runner: headless runner for the customer advisor service.
//!
//! Usage:
//!   advisor-runner --csv data/Transaction_clustered.csv --db advisor.db
//!   advisor-runner --db advisor.db --account 40012345678
//!   advisor-runner --db advisor.db --page 0 --page-size 100
//!   advisor-runner --db advisor.db --watch --refresh-secs 300

use advisor_core::{
    cache::AnalyticsCache,
    classifier::ClusterClassifier,
    config::AdvisorConfig,
    dataset,
    scorer::CustomerScorer,
    service::AdvisorService,
    store::AdvisorStore,
};
use anyhow::Result;
use std::env;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let config_file = str_arg(&args, "--config");
    let mut config = match config_file {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };
    if let Some(db) = str_arg(&args, "--db") {
        config.db_path = db.to_string();
    }
    if let Some(dir) = str_arg(&args, "--model-dir") {
        config.model_dir = dir.to_string();
    }
    config.refresh_secs = parse_arg(&args, "--refresh-secs", config.refresh_secs);

    let csv = str_arg(&args, "--csv");
    let watch = args.iter().any(|a| a == "--watch");
    let accounts: Vec<String> = args
        .windows(2)
        .filter(|w| w[0] == "--account")
        .map(|w| w[1].clone())
        .collect();
    let page = str_arg(&args, "--page").map(|_| parse_arg(&args, "--page", 0u64));
    let page_size = parse_arg(&args, "--page-size", 100u64);

    println!("Customer Advisor — advisor-runner");
    println!("  db:         {}", config.db_path);
    println!("  model dir:  {}", config.model_dir);
    if let Some(path) = csv {
        println!("  dataset:    {path}");
    }
    println!();

    // For :memory:, use a SQLite shared-memory URI so the refresher's second
    // connection (store.reopen()) sees the same database.
    let db_effective = if config.db_path == ":memory:" {
        format!("file:advisor_{}?mode=memory&cache=shared", std::process::id())
    } else {
        config.db_path.clone()
    };
    let store = AdvisorStore::open(&db_effective)?;
    store.migrate()?;

    if let Some(path) = csv {
        let imported = dataset::import_csv(&store, path)?;
        println!("Imported {imported} dataset rows.");
    } else if config_file.is_some() && store.distinct_account_count()? == 0 {
        // First boot against a config file: pull in the configured dataset.
        let imported = dataset::import_csv(&store, &config.dataset_path)?;
        println!("Imported {imported} dataset rows from {}.", config.dataset_path);
    }

    // Artifact load failure is fatal — nothing can be scored without them.
    let classifier = ClusterClassifier::load(&config.model_dir)?;
    let scorer = CustomerScorer::new(classifier);
    let cache = AnalyticsCache::new();

    if watch {
        let _refresher = advisor_core::cache::spawn_refresher(
            cache.clone(),
            store.reopen()?,
            config.refresh_interval(),
        )?;
        log::info!(
            "watch mode: refreshing analytics every {}s",
            config.refresh_secs
        );
        let service = AdvisorService::new(store, scorer, cache);
        report_forever(&service, config.refresh_interval());
    }

    let service = AdvisorService::new(store, scorer, cache);

    let snapshot = service.analytics()?;
    println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);

    match accounts.len() {
        0 => {}
        1 => {
            let scored = service.customer(&accounts[0])?;
            println!("{}", serde_json::to_string_pretty(&scored)?);
        }
        _ => {
            let scored = service.customers_batch(&accounts)?;
            println!("{}", serde_json::to_string_pretty(&scored)?);
        }
    }

    if let Some(page) = page {
        let result = service.customers_page(page * page_size, page_size)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

/// Print a one-line summary every interval until killed.
fn report_forever(service: &AdvisorService, interval: Duration) -> ! {
    loop {
        thread::sleep(interval);
        match service.analytics() {
            Ok(snapshot) => println!(
                "[{}] customers={} recommendations={} avg={}",
                snapshot.last_updated,
                snapshot.total_customers,
                snapshot.total_recommendations,
                snapshot.avg_products_per_customer
            ),
            Err(e) => log::warn!("no snapshot available yet: {e}"),
        }
    }
}

fn str_arg<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], name: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == name)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

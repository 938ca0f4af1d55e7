mod cli;

use reelposter::config;
use reelposter::metadata::{PosterResolver, Resolution, TmdbCatalog};
use reelposter_parser::Parser as TitleParser;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Serialize)]
struct ResolveOutput<'a> {
    title: &'a str,
    url: &'a str,
    source: reelposter::metadata::ArtworkSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a [reelposter::metadata::ResolveState]>,
}

async fn resolve_titles(
    titles: Vec<String>,
    config_path: Option<&Path>,
    api_key: Option<String>,
    json: bool,
    trace: bool,
) -> Result<()> {
    let config = config::load_config_with_api_key(config_path, api_key)?;

    let catalog = Arc::new(TmdbCatalog::new(&config.catalog)?);
    let resolver = PosterResolver::from_config(catalog, &config);

    tracing::debug!(
        count = titles.len(),
        concurrency = config.resolver.concurrency,
        "Resolving titles"
    );
    let results = resolver
        .resolve_many(&titles, config.resolver.concurrency)
        .await;

    if json {
        let output: Vec<ResolveOutput> = titles
            .iter()
            .zip(&results)
            .map(|(title, res)| ResolveOutput {
                title,
                url: &res.url,
                source: res.source,
                trace: trace.then_some(res.trace.as_slice()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (title, res) in titles.iter().zip(&results) {
            print_resolution(title, res, titles.len() > 1, trace);
        }
    }

    Ok(())
}

fn print_resolution(title: &str, res: &Resolution, labelled: bool, trace: bool) {
    if labelled {
        println!("{}\t{}", title, res.url);
    } else {
        println!("{}", res.url);
    }
    if trace {
        let states: Vec<String> = res.trace.iter().map(|s| format!("{:?}", s)).collect();
        println!("  {}", states.join(" -> "));
    }
}

fn parse_title(title: &str, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let parsed = TitleParser::new(config.parser).parse(title);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("Title: {}", parsed.clean_title);
        println!(
            "Year: {}",
            parsed.year.map_or("-".to_string(), |y| y.to_string())
        );
        println!(
            "Season: {}",
            parsed.season.map_or("-".to_string(), |s| s.to_string())
        );
        println!("Type: {}", parsed.forced_type);
        if parsed.degraded {
            println!("(degraded: no clean title could be extracted)");
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, checking default locations");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  Catalog: {}", config.catalog.base_url);
    println!(
        "  API key: {}",
        if config.catalog.api_key.is_empty() {
            "not set"
        } else {
            "set"
        }
    );
    println!(
        "  Artwork: {}/{}",
        config.artwork.image_base_url, config.artwork.poster_size
    );
    println!("  Placeholder: {}", config.artwork.fallback_url);
    println!(
        "  Cache: {}",
        if config.cache.enabled {
            format!(
                "{} entries, {}s TTL",
                config.cache.max_entries, config.cache.ttl_secs
            )
        } else {
            "disabled".to_string()
        }
    );
    println!("  Concurrency: {}", config.resolver.concurrency);

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelposter=trace,reelposter_parser=debug".to_string()
        } else {
            "reelposter=info".to_string()
        }
    });

    // Logs go to stderr so resolved URLs on stdout stay pipeable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            titles,
            json,
            trace,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve_titles(
                titles,
                cli.config.as_deref(),
                cli.api_key,
                json,
                trace,
            ))
        }
        Commands::Parse { title, json } => parse_title(&title, cli.config.as_deref(), json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelposter {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

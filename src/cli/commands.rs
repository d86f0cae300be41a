//! CLI command implementations
//!
//! Each command loads configuration, installs logging, builds the hero
//! service over an in-memory store, runs once, and prints JSON.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::filter::{Explain, FilterRequest};
use crate::heroes::{Hero, HeroService};
use crate::logging;
use crate::registry::{registry_for, DataType};
use crate::store::MemoryStore;

use super::args::Command;
use super::errors::CliResult;
use super::io::{load_dataset, read_request, write_json};

type Service = HeroService<MemoryStore<Hero>>;

/// One registry entry as printed by `fields`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldListing<'a> {
    name: &'a str,
    attribute_name: &'a str,
    data_type: DataType,
    global: bool,
}

#[derive(Debug, Serialize)]
struct CountOutput {
    count: u64,
}

/// Dispatches a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Query { config, request } => query(config.as_deref(), request.as_deref()),
        Command::Count { config, request } => count(config.as_deref(), request.as_deref()),
        Command::Explain { config, request } => explain(config.as_deref(), request.as_deref()),
        Command::Search { config, name } => search(config.as_deref(), &name),
        Command::Top { config, count } => top(config.as_deref(), count),
        Command::Fields => fields(),
    }
}

/// Runs find-matching and prints the page with its total
pub fn query(config_path: Option<&Path>, request_path: Option<&Path>) -> CliResult<()> {
    let (_, service) = boot(config_path)?;
    let request = read_request(request_path)?;

    let result = service.find(&request)?;
    write_json(&result)
}

/// Prints how many records a request matches
pub fn count(config_path: Option<&Path>, request_path: Option<&Path>) -> CliResult<()> {
    let (_, service) = boot(config_path)?;
    let request = read_request(request_path)?;

    let count = service.count(&request)?;
    write_json(&CountOutput { count })
}

/// Prints the compiled predicate, ordering, and page
pub fn explain(config_path: Option<&Path>, request_path: Option<&Path>) -> CliResult<()> {
    let (config, service) = boot(config_path)?;
    let request = read_request(request_path)?;

    let explain = explain_request(&service, &request, &config)?;
    info!(explain = %explain, "explained request");
    write_json(&explain)
}

pub fn search(config_path: Option<&Path>, name: &str) -> CliResult<()> {
    let (_, service) = boot(config_path)?;
    let heroes = service.search(name)?;
    write_json(&heroes)
}

pub fn top(config_path: Option<&Path>, count: u32) -> CliResult<()> {
    let (_, service) = boot(config_path)?;
    let heroes = service.top_heroes(count)?;
    write_json(&heroes)
}

/// Lists the hero registry in declaration order
pub fn fields() -> CliResult<()> {
    let registry = registry_for::<Hero>()?;
    let listing: Vec<FieldListing<'_>> = registry
        .iter()
        .map(|(name, descriptor)| FieldListing {
            name,
            attribute_name: &descriptor.attribute_name,
            data_type: descriptor.data_type,
            global: descriptor.global,
        })
        .collect();
    write_json(&listing)
}

fn explain_request(
    service: &Service,
    request: &FilterRequest,
    config: &Config,
) -> CliResult<Explain> {
    let explain = Explain::compile(
        request,
        service.registry(),
        Some(config.default_sort_field.as_str()),
    )?;
    Ok(explain)
}

/// Loads config, installs logging, and builds the service
fn boot(config_path: Option<&Path>) -> CliResult<(Config, Service)> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    logging::init(&config.logging)?;

    let heroes = match config_path.and_then(|path| config.data_path(path)) {
        Some(data_path) => load_dataset(&data_path)?,
        None => Hero::initial_roster(),
    };
    info!(records = heroes.len(), "hero dataset loaded");

    let service = build_service(heroes, &config)?;
    Ok((config, service))
}

fn build_service(heroes: Vec<Hero>, config: &Config) -> CliResult<Service> {
    let service = HeroService::new(MemoryStore::new(heroes))?
        .with_default_field(config.default_sort_field.clone())
        .with_max_rows(config.max_rows);
    Ok(service)
}

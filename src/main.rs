use std::process::ExitCode;

use clap::Parser;
use cli::{Command, GenerateOpts, Opts, RoutesOpts};
use config::Config;
use diagnostics::GenerateResult;
use generator::route_table::{RouteEntry, RouteTable};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod collector;
mod config;
mod diagnostics;
mod generator;

#[cfg(test)]
mod tests;

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "httpd_embed=debug"
    } else {
        "httpd_embed=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_config(opts: &Opts) -> GenerateResult<Config> {
    match &opts.config {
        Some(path) => {
            let config = config::read_config(path)?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Apply the flags over the file and validate the merged result.
fn validated(mut config: Config, apply: impl FnOnce(&mut Config)) -> GenerateResult<Config> {
    apply(&mut config);
    config::validation::validate_config(&config).map_err(diagnostics::GenerateError::Validation)?;
    Ok(config)
}

pub fn generate(opts: &Opts, generate_opts: &GenerateOpts) -> GenerateResult<()> {
    let config = validated(read_config(opts)?, |c| generate_opts.apply(c))?;

    let documents = generator::generate(&generate_opts.site.input_dir, &config)?;
    let (interface, implementation) = documents.write(&config.output)?;

    eprintln!(
        "Generated `{}` and `{}` with {} routes.",
        interface.display(),
        implementation.display(),
        documents.capacity
    );
    Ok(())
}

fn route_line(route: &RouteEntry) -> String {
    if route.is_alias() {
        format!("{route} (alias)")
    } else {
        route.to_string()
    }
}

/// Machine readable form of the table printed by `routes --json`.
fn manifest(table: &RouteTable) -> serde_json::Value {
    serde_json::json!({
        "files": table.files,
        "routes": table.routes,
        "capacity": table.capacity(),
    })
}

fn print_table(table: &RouteTable) {
    cli::print_label("FILES");
    for (file, data) in table.files.iter().zip(&table.data) {
        println!(
            "{:<12} {:>8} B  {:<7} (sizeof {:>8})  {}",
            file.symbols.data, file.bytes, file.embedding, data.size, file.path
        );
    }

    cli::print_label("ROUTES");
    for route in &table.routes {
        println!("{}", route_line(route));
    }
    println!("\nmax_uri_handlers = {}", table.capacity());
}

pub fn routes(opts: &Opts, routes_opts: &RoutesOpts) -> GenerateResult<()> {
    let config = validated(read_config(opts)?, |c| routes_opts.apply(c))?;
    let table = generator::build_route_table(&routes_opts.site.input_dir, &config)?;

    if routes_opts.json {
        println!("{:#}", manifest(&table));
    } else {
        print_table(&table);
    }
    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    let result = match &opts.command {
        Command::Generate(generate_opts) => generate(&opts, generate_opts),
        Command::Routes(routes_opts) => routes(&opts, routes_opts),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

//! openapi-from-router - Command-line tool for generating OpenAPI documents.
//!
//! Reads the router dump a web application exports, walks the routes it declares, merges
//! handler annotations with doc comments, and writes an OpenAPI 3.x document.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-router [OPTIONS] <COMMAND>
//! ```
//!
//! # Examples
//!
//! Generate YAML documentation:
//! ```bash
//! openapi-from-router generate router.json -o openapi.yaml
//! ```
//!
//! Generate JSON with doc comments and a config file:
//! ```bash
//! openapi-from-router generate router.json --docs ./src -c openapi.config.yaml -f json
//! ```
//!
//! Check a document:
//! ```bash
//! openapi-from-router validate openapi.yaml
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_router::cli;

fn main() -> Result<()> {
    // Parse once to read the verbose flag before the logger exists
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("openapi-from-router starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;
    cli::run(args)?;

    info!("Done");

    Ok(())
}

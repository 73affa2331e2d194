mod config;
mod output;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{CatalogSource, Overrides, PhpverConfig, Settings};
use output::{OutputFormat, Outputs};
use phpver_matrix::{
    load_catalog_file, manifest_path, matrix, maximum, minimum, php_requirement, CatalogClient,
    ReleaseDescriptor, SupportPolicy,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "phpver")]
#[command(about = "Resolve the PHP requirement of a composer.json into a version matrix")]
#[command(version)]
struct Args {
    /// Directory containing composer.json
    #[arg(long, env = "INPUT_WORKING-DIRECTORY", default_value = ".")]
    working_directory: PathBuf,

    /// Use this constraint instead of the one declared in composer.json
    #[arg(long, env = "INPUT_CONSTRAINT")]
    constraint: Option<String>,

    /// Include releases that are not generally available yet
    #[arg(long, env = "INPUT_INCLUDE-FUTURE", num_args = 0..=1, default_missing_value = "true")]
    include_future: Option<bool>,

    /// Include releases no longer supported under the support policy
    #[arg(long, env = "INPUT_INCLUDE-UNSUPPORTED", num_args = 0..=1, default_missing_value = "true")]
    include_unsupported: Option<bool>,

    /// What counts as a supported release
    #[arg(long, env = "INPUT_SUPPORT-POLICY", value_parser = parse_support_policy)]
    support_policy: Option<SupportPolicy>,

    /// Release catalog endpoint
    #[arg(long, env = "INPUT_CATALOG-URL")]
    catalog_url: Option<String>,

    /// Read the release catalog from a local JSON file
    #[arg(long, env = "INPUT_CATALOG-FILE", conflicts_with = "catalog_url")]
    catalog_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "github")]
    output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_support_policy(value: &str) -> std::result::Result<SupportPolicy, String> {
    value.parse()
}

fn init_logging(verbose: bool) {
    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let level = if verbose || runner_debug { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

async fn load_releases(catalog: &CatalogSource) -> Result<Vec<ReleaseDescriptor>> {
    match catalog {
        CatalogSource::File(path) => load_catalog_file(path)
            .with_context(|| format!("Failed to load release catalog from {}", path.display())),
        CatalogSource::Url(url) => {
            let client = CatalogClient::with_url(url.as_str())?;
            client
                .fetch()
                .await
                .with_context(|| format!("Failed to fetch release catalog from {}", url))
        }
    }
}

async fn execute(args: Args) -> Result<Outputs> {
    let config = PhpverConfig::load(&args.working_directory)?;
    let settings = Settings::resolve(
        Overrides {
            include_future: args.include_future,
            include_unsupported: args.include_unsupported,
            support_policy: args.support_policy,
            catalog_url: args.catalog_url,
            catalog_file: args.catalog_file,
        },
        config,
    );
    log::debug!("Resolved settings: {:?}", settings);

    let constraint = match args.constraint {
        Some(constraint) => constraint,
        None => {
            let path = manifest_path(&args.working_directory);
            php_requirement(&path)?
                .ok_or_else(|| anyhow!("composer.json does not declare a PHP requirement"))?
        }
    };
    log::info!("PHP requirement is {}", constraint);

    let releases = load_releases(&settings.catalog).await?;
    let versions = matrix(&constraint, &releases, &settings.options)?;
    let minimal = minimum(&versions)?;
    let latest = maximum(&versions)?;

    Ok(Outputs {
        composer_php_version: constraint,
        matrix: versions,
        minimal,
        latest,
    })
}

fn run(args: Args) -> Result<()> {
    let format = args.output;
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| anyhow!("Failed to create async runtime: {}", e))?;
    let outputs = rt.block_on(execute(args))?;
    output::emit(&outputs, format)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let format = args.output;
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::report_error(&e, format);
            ExitCode::FAILURE
        }
    }
}

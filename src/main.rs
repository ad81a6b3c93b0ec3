use asset_manifest::config::{self, AppConfig};
use asset_manifest::imaging::RustProber;
use asset_manifest::publish::GithubContentApi;
use asset_manifest::{output, pipeline, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asset-manifest")]
#[command(about = "Publish a manifest of an image directory to a GitHub repository")]
#[command(long_about = "\
Publish a manifest of an image directory to a GitHub repository

Every jpg, jpeg, png, gif, bmp, svg or webp file in the assets directory is
probed for its dimensions and format and becomes one manifest entry:

  {\"type\":\"png\",\"height\":100,\"width\":200,\"src\":\"<public_url>/cat.png\",\"title\":\"cat\"}

The manifest replaces an existing file in the repository root (list.json by
default) through the contents API. The file must already exist.

Environment:
  GITHUB_ACCESS_TOKEN   bearer token
  GITHUB_OWNER          repository owner
  GITHUB_REPO           repository name
  GITHUB_URL            public URL prefix for src

Run 'asset-manifest gen-config' to generate a documented manifest.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; defaults apply when it is missing)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Assets directory (overrides `assets_dir` from config)
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan, build and publish the manifest (default)
    Publish,
    /// Scan and print the manifest without publishing
    Scan,
    /// Print a stock manifest.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Command::Publish) {
        Command::Publish => {
            let config = load(&cli.config)?;
            config::warn_unset_remote(&config);
            let assets_dir = assets_dir(&cli.assets, &config);
            let api = GithubContentApi::new(
                &config.api_base,
                &config.owner,
                &config.repo,
                config.token.as_ref().map(|t| t.expose()),
            )?;

            info!(owner = %config.owner, repo = %config.repo, "generating manifest");
            let summary = pipeline::run(&config, &assets_dir, &RustProber::new(), &api)?;
            output::print_scan_output(&summary.entries);
            output::print_publish_outcome(&config.target_file, &summary.outcome);
            info!(success = summary.outcome.is_success(), "done");

            if !summary.outcome.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Scan => {
            let config = load(&cli.config)?;
            let assets_dir = assets_dir(&cli.assets, &config);
            let entries = scan::scan(
                &assets_dir,
                &config.public_url,
                &RustProber::new(),
                config.scan.order,
            )?;
            output::print_scan_output(&entries);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Log filter from `RUST_LOG`, defaulting to `info`. Logs go to stderr so
/// stdout stays clean for the manifest.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &std::path::Path) -> Result<AppConfig, config::ConfigError> {
    config::load_config(path, |key| std::env::var(key).ok())
}

fn assets_dir(cli_assets: &Option<PathBuf>, config: &AppConfig) -> PathBuf {
    cli_assets
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.assets_dir))
}

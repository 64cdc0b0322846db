use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use version_scan::config::{self, GITHUB_TOKEN_ENV};
use version_scan::logging;
use version_scan::report::{self, RepositoryResults};
use version_scan::scan::ScanSession;

#[derive(Parser)]
#[command(name = "version-scan")]
#[command(
    version,
    about = "Report outdated npm, deno.land and GitHub dependencies of local repositories"
)]
struct Cli {
    /// Repository directories to scan
    #[arg(default_value = ".")]
    repos: Vec<PathBuf>,

    /// Config file [default: <config dir>/version-scan/config.json]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print `{ repository: [items] }` JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Also write JSON logs to <data dir>/version-scan/version-scan.log
    #[arg(long)]
    log_file: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_path = cli.log_file.then(config::log_path);
    let _guard = logging::init(log_path.as_deref()).context("Failed to initialize logging")?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = config::load_config(cli.config.as_deref())?;
    let targets = config.targets();
    let session = ScanSession::from_config(&config, std::env::var(GITHUB_TOKEN_ENV).ok());

    let mut results = RepositoryResults::new();
    let mut aborted = false;

    for repo in &cli.repos {
        let name = repo.display().to_string();
        match session.scan_repository(repo, &targets).await {
            Ok(items) => {
                results.insert(name, items);
            }
            Err(e) => {
                error!("Aborted scan of {}: {}", name, e);
                aborted = true;
            }
        }
    }

    if cli.json {
        println!("{}", report::render_json(&results)?);
    } else {
        let tables = report::render_tables(&results);
        if !tables.is_empty() {
            println!("{}", tables);
        }
    }

    Ok(if aborted {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

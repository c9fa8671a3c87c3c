//! DVR Archiver CLI
//!
//! A command-line tool for archiving network DVR recordings into tagged Matroska files.

use clap::Parser;
use dvr_archiver::cli::{
    args::{Cli, Commands},
    commands::{archive, devices, dump, recordings},
};
use dvr_archiver::models::config::{self, Config};
use dvr_archiver::preflight;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config();

    match cli.command {
        Commands::Archive {
            source,
            dest,
            delete,
            rerecord,
            extension,
        } => {
            if !cli.skip_preflight {
                run_preflight_checks(&config, true).await?;
            }

            let options = archive::ArchiveOptions {
                delete,
                rerecord,
                extension,
            };
            archive::archive(&source, &dest, &options, &config).await?;
        }

        Commands::Dump { file } => {
            dump::dump(&file)?;
        }

        Commands::Devices => {
            devices::list_devices(&config).await?;
        }

        Commands::Recordings { source } => {
            if !cli.skip_preflight {
                run_preflight_checks(&config, false).await?;
            }

            recordings::list_recordings(source.as_deref(), &config).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("dvr_archiver=debug")
    } else {
        EnvFilter::new("dvr_archiver=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config, needs_mkvmerge: bool) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config, needs_mkvmerge).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}

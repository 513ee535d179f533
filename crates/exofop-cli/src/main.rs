//! exofop — command-line access to ExoFOP target pages.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use exofop::{ExofopClient, ExofopConfig};

#[derive(Parser)]
#[command(
    name = "exofop",
    about = "exofop — photometry, stellar parameters, candidates and files from ExoFOP",
    version
)]
struct Cli {
    /// Mission path segment (k2, tess, ...). Also reads EXOFOP_MISSION.
    #[arg(long, global = true)]
    mission: Option<String>,

    /// Archive root URL. Also reads EXOFOP_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory for downloaded files. Also reads EXOFOP_OUTPUT_DIR.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Output results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Magnitudes per photometric band.
    Photometry {
        /// Target identifier (EPIC id for K2).
        id: String,
        /// Also write the text summary to this file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Teff, log(g), [Fe/H] and stellar radius from the preferred catalogue.
    Stellar {
        /// Target identifier (EPIC id for K2).
        id: String,
        /// Leave out the stellar radius.
        #[arg(long)]
        no_radius: bool,
        /// Also write the text summary to this file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Planet candidate transit and radius parameters.
    Candidates {
        /// Target identifier (EPIC id for K2).
        id: String,
        /// Also write the text summary to this file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// List links on the target page, optionally only one file extension.
    Links {
        /// Target identifier (EPIC id for K2).
        id: String,
        /// Only links ending in this extension, resolved to absolute URLs.
        #[arg(long)]
        ext: Option<String>,
    },
    /// Download every linked file with the given extension into <id>/<ext>/.
    Download {
        /// Target identifier (EPIC id for K2).
        id: String,
        /// File extension to download (e.g. csv, fits).
        #[arg(long)]
        ext: String,
    },
    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ExofopConfig::from_env();
    if let Some(base) = &cli.base_url {
        config = config.with_base_url(base);
    }
    if let Some(mission) = &cli.mission {
        config = config.with_mission(mission);
    }
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_dir(dir);
    }

    let client = ExofopClient::new(config);
    let json = cli.json;

    let result = match cli.command {
        Commands::Photometry { id, save } => {
            commands::photometry(&client, &id, save.as_deref(), json).await
        }
        Commands::Stellar {
            id,
            no_radius,
            save,
        } => commands::stellar(&client, &id, !no_radius, save.as_deref(), json).await,
        Commands::Candidates { id, save } => {
            commands::candidates(&client, &id, save.as_deref(), json).await
        }
        Commands::Links { id, ext } => commands::links(&client, &id, ext.as_deref(), json).await,
        Commands::Download { id, ext } => commands::download(&client, &id, &ext, json).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "exofop", &mut std::io::stdout());
            Ok(())
        }
    };

    // 0=success, 1=error
    if let Err(e) = &result {
        if json {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}

//! Main application entry point.

use clap::{Parser, Subcommand, ValueEnum};
use layoutsmith_app::{App, AppConfig, CliError, ShortcutRegistry};
use layoutsmith_core::{EditorConfig, ExportFormat, STORAGE_KEY};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "layoutsmith", about = "Layoutsmith canvas editor sessions")]
struct Cli {
    /// Directory holding stored snapshots.
    #[arg(long, env = "LAYOUTSMITH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage key of the session.
    #[arg(long, default_value = STORAGE_KEY)]
    key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a JSON-lines event log to the stored session ("-" reads stdin).
    Replay { file: PathBuf },
    /// Export the stored session.
    Export {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Write to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Remove the stored session.
    Reset,
    /// List keyboard and pointer shortcuts.
    Shortcuts,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Html,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ExportFormat::Json,
            Format::Html => ExportFormat::Html,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Shortcuts = cli.command {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let app = App::open(AppConfig {
        data_dir: cli.data_dir,
        editor: EditorConfig {
            storage_key: cli.key,
            ..EditorConfig::default()
        },
    })?;

    match cli.command {
        Command::Replay { file } => {
            let summary = if file.as_os_str() == "-" {
                app.replay(io::stdin().lock())?
            } else {
                app.replay(BufReader::new(File::open(&file)?))?
            };
            println!(
                "applied {} events ({} changed the design, {} skipped)",
                summary.applied, summary.changed, summary.skipped
            );
        }
        Command::Export { format, out } => {
            let output = app.export(format.into())?;
            match out {
                Some(path) => {
                    fs::write(&path, output)?;
                    log::info!("Exported to {}", path.display());
                }
                None => println!("{}", output),
            }
        }
        Command::Reset => app.reset()?,
        Command::Shortcuts => ShortcutRegistry::print_all(),
    }
    Ok(())
}

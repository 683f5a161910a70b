mod embedded;

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use burnrate_core::{
    load_client_settings, load_embedded_game_data, AppConfig, ContentBundle, DirBundle, Outcome,
    Paths, SaveRepository, SaveSummary,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Inspect and manage Galaxies: Burn Rate saves.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional configuration file layered under `BURNRATE_*` variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read game data documents from this directory instead of the embedded copy
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the effective client settings, extracting defaults on first launch
    Settings,
    /// Create a new save and print its identifier
    New {
        /// Captain name
        #[arg(long)]
        captain: String,
        /// Ship name
        #[arg(long)]
        ship: String,
    },
    /// Show the documents stored in a save
    Load {
        /// Save identifier, as printed by `list`
        id: String,
        /// Print the content of one document instead of the index
        #[arg(long)]
        dump: Option<String>,
    },
    /// List available saves
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the bundled static content documents
    Data,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }

    let Outcome {
        value: paths,
        warnings,
    } = Paths::resolve(&config);
    init_logging(&paths.app_root());
    // resolution ran before the subscriber existed
    for warning in &warnings {
        warn!("{warning}");
    }

    let bundle: Box<dyn ContentBundle> = match &config.data_dir {
        Some(dir) => {
            info!("serving game data from {}", dir.display());
            Box::new(DirBundle::new(dir))
        }
        None => Box::new(embedded::bundle()),
    };

    match args.cmd {
        Command::Settings => {
            let settings = load_client_settings(&paths, &*bundle).into_value();
            print!("{}", serde_yaml::to_string(&settings)?);
        }
        Command::New { captain, ship } => {
            let repo = SaveRepository::new(paths);
            let id = repo
                .create_new_save(&*bundle, &captain, &ship)
                .with_context(|| format!("failed to create save for {captain}"))?
                .into_value();
            println!("{id}");
        }
        Command::Load { id, dump } => {
            let repo = SaveRepository::new(paths);
            let data = repo.load_save_game(&id).into_value();
            match dump {
                Some(name) => {
                    let content = data
                        .get(&name)
                        .with_context(|| format!("{name} not found in {id}"))?;
                    print!("{content}");
                }
                None => {
                    for (name, content) in &data {
                        println!("{name:<24} {:>8} bytes", content.len());
                    }
                }
            }
        }
        Command::List { json } => {
            let repo = SaveRepository::new(paths);
            let saves = repo.get_available_saves().into_value();
            if json {
                println!("{}", serde_json::to_string_pretty(&saves)?);
            } else {
                print_saves(&saves);
            }
        }
        Command::Data => {
            let data = load_embedded_game_data(&*bundle).into_value();
            for (name, content) in &data {
                println!("{name:<24} {:>8} bytes", content.len());
            }
        }
    }

    Ok(())
}

fn print_saves(saves: &[SaveSummary]) {
    if saves.is_empty() {
        println!("No saves found.");
        return;
    }
    println!(
        "{:<22} {:<16} {:<16} {:>5} {:>9} {:>6}  LOCATION",
        "SAVE", "CAPTAIN", "SHIP", "DAY", "CREDITS", "FUEL"
    );
    for save in saves {
        println!(
            "{:<22} {:<16} {:<16} {:>5} {:>9} {:>6}  {}",
            save.save_id,
            save.captain_name,
            save.ship_name,
            save.current_day,
            save.credits,
            save.current_fuel,
            save.current_location
        );
    }
}

fn open_log_file(app_root: &Path) -> Result<File> {
    let log_dir = app_root.join("logs");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("burnrate.log");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))
}

/// Log to stderr and `<app root>/logs/burnrate.log`, or stderr only when the
/// log file cannot be opened.
fn init_logging(app_root: &Path) {
    let (log_file, log_error) = match open_log_file(app_root) {
        Ok(file) => (Some(file), None),
        Err(err) => (None, Some(err)),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .compact()
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(err) = log_error {
        warn!("file logging disabled: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn data_dir_flag_is_global() {
        let args = Args::try_parse_from(["burnrate", "data", "--data-dir", "/srv/game_data"])
            .expect("valid arguments");
        assert_eq!(args.data_dir, Some(PathBuf::from("/srv/game_data")));
        assert!(matches!(args.cmd, Command::Data));

        let args = Args::try_parse_from(["burnrate", "list"]).expect("valid arguments");
        assert!(args.data_dir.is_none());
    }

    #[test]
    fn log_file_is_created_under_app_root() -> Result<()> {
        let dir = tempdir()?;
        open_log_file(dir.path())?;
        assert!(dir.path().join("logs/burnrate.log").is_file());
        Ok(())
    }

    #[test]
    fn unusable_log_dir_is_an_error_not_a_panic() -> Result<()> {
        let dir = tempdir()?;
        let app_root = dir.path().join("app");
        fs::write(&app_root, "not a directory")?;
        assert!(open_log_file(&app_root).is_err());
        Ok(())
    }
}

use clap::Parser;
use log::{debug, warn, LevelFilter};
use playerdb_radar_lib::commands::lookup_command::{find_preset, list_platforms, lookup_player};
use playerdb_radar_lib::config::{app_directory, ProjectDirsExt};
use playerdb_radar_lib::logging::{parse_level, setup_logging};
use playerdb_radar_lib::playerdb::api::PlayerDbApi;
use playerdb_radar_lib::playerdb::dto::PlayerPlatform;
use playerdb_radar_lib::state::config_state::{ConfigManager, LookupConfig};
use playerdb_radar_lib::state::lookup_state::LookupState;
use playerdb_radar_lib::utils::card_utils::{render_error, render_profile_card};
use std::path::PathBuf;
use std::process::ExitCode;

/// Search gamer profiles on PlayerDB.
#[derive(Parser, Debug)]
#[command(name = "playerdb-radar", version, about)]
struct Cli {
    /// Username, UUID or ID to look up
    query: Option<String>,

    /// Network to search (minecraft, bedrock, xbox, psn, steam)
    #[arg(short, long)]
    platform: Option<PlayerPlatform>,

    /// Run a sample lookup instead (0: Minecraft · Notch, 1: Xbox · Ninja)
    #[arg(long, conflicts_with_all = ["query", "platform"])]
    preset: Option<usize>,

    /// Print the profile as JSON instead of a card
    #[arg(long)]
    json: bool,

    /// Path to a config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// List supported platforms and exit
    #[arg(long)]
    list_platforms: bool,
}

async fn load_config(path: Option<PathBuf>) -> LookupConfig {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => match ConfigManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                eprintln!("[Config] {}; using defaults", e);
                return LookupConfig::default();
            }
        },
    };

    match manager.load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "[Config] Failed to load {}: {}; using defaults",
                manager.config_path().display(),
                e
            );
            LookupConfig::default()
        }
    }
}

async fn init_logging(config: &LookupConfig, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        parse_level(&config.log_level)
    };
    let log_dir = if config.file_logging {
        app_directory().ok().map(|dirs| dirs.log_dir())
    } else {
        None
    };

    if let Err(e) = setup_logging(log_dir.as_deref(), level).await {
        eprintln!("[Logging Setup] {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_platforms {
        for option in list_platforms() {
            println!("{:<10} {}", option.id.as_str(), option.label);
        }
        return ExitCode::SUCCESS;
    }

    let config = load_config(cli.config).await;
    init_logging(&config, cli.verbose).await;
    debug!("Effective config: {:?}", config);

    let (query, platform) = match cli.preset {
        Some(index) => match find_preset(index) {
            Ok(preset) => (preset.username.to_string(), preset.platform),
            Err(e) => {
                eprintln!("{}", render_error(&e.message));
                return ExitCode::from(2);
            }
        },
        None => (
            cli.query.unwrap_or_default(),
            cli.platform.unwrap_or(config.default_platform),
        ),
    };

    let api = match PlayerDbApi::new(&config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{}", render_error(&e.to_string()));
            return ExitCode::from(2);
        }
    };
    let state = LookupState::new();

    match lookup_player(&api, &state, &query, platform).await {
        Ok(profile) => {
            if cli.json {
                match serde_json::to_string_pretty(&profile) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        warn!("Failed to serialize profile: {}", e);
                        return ExitCode::from(2);
                    }
                }
            } else {
                println!("{}", render_profile_card(&profile));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if cli.json {
                match serde_json::to_string_pretty(&e) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("{}", render_error(&e.message)),
                }
            } else {
                eprintln!("{}", render_error(&e.message));
            }
            ExitCode::from(1)
        }
    }
}

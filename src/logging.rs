use crate::error::{AppError, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;
use tokio::fs;

const LOG_FILE_NAME: &str = "radar.log";
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} | {({l}):5.5} | {m}{n}";
const CONSOLE_LOG_PATTERN: &str = "{d(%H:%M:%S)} | {h({l}):5.5} | {m}{n}";
const LOG_FILE_SIZE_LIMIT_MB: u64 = 10;
const LOG_FILE_BACKUP_COUNT: u32 = 5;

/// Parses a configured level name, defaulting to `Info` for anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Initializes log4rs with a stderr console appender and, when `log_dir` is set,
/// a size-rolled file appender. Console output goes to stderr so stdout only
/// carries lookup results.
pub async fn setup_logging(log_dir: Option<&Path>, level: LevelFilter) -> Result<()> {
    let console_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_LOG_PATTERN)))
        .target(Target::Stderr)
        .build();

    let mut config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(console_appender)));
    let mut root = Root::builder().appender("stderr");

    if let Some(log_dir) = log_dir {
        if !log_dir.exists() {
            fs::create_dir_all(log_dir).await?;
        }

        let log_file_path = log_dir.join(LOG_FILE_NAME);
        let size_trigger = SizeTrigger::new(LOG_FILE_SIZE_LIMIT_MB * 1024 * 1024);
        let roller_pattern = log_dir.join(format!("{}.{{}}", LOG_FILE_NAME));
        let roller_pattern = roller_pattern
            .to_str()
            .ok_or_else(|| AppError::Logging("Log directory is not valid UTF-8".to_string()))?;
        let roller = FixedWindowRoller::builder()
            .base(1)
            .build(roller_pattern, LOG_FILE_BACKUP_COUNT)
            .map_err(|e| AppError::Logging(e.to_string()))?;
        let compound_policy = CompoundPolicy::new(Box::new(size_trigger), Box::new(roller));

        let file_appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(log_file_path, Box::new(compound_policy))?;

        config = config.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
    }

    let config = config
        .build(root.build(level))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| AppError::Logging(e.to_string()))?;

    match log_dir {
        Some(dir) => log::info!("Logging initialized. Log directory: {}", dir.display()),
        None => log::info!("Logging initialized (console only)"),
    }

    Ok(())
}

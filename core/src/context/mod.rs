mod background_tasks;
mod config;
mod error;
mod fetcher;
mod log_files;
mod parser;
mod parsing_session;
pub mod watcher;

pub use background_tasks::BackgroundTasks;
pub use config::{AppConfig, AppConfigExt, XivApiSettings};
pub use error::{ConfigError, WatcherError};
pub use fetcher::AbilityFetcher;
pub use log_files::{DirectoryIndex, LogFileMetaData, is_network_log, parse_log_filename};
pub use parser::{ParseResult, enemy_ability_ids, parse_file, resolve_log_path};
pub use parsing_session::ParsingSession;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use xivlog_core::context::{AppConfig, AppConfigExt, BackgroundTasks, DirectoryIndex, ParsingSession};
use xivlog_core::hit_type::{AbilityCache, SharedAbilityCache};

/// Shared handle to a parsing session that can be passed to the reader.
pub type SessionHandle = Arc<RwLock<ParsingSession>>;

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// The active parsing session. None if no file is loaded.
    session: Arc<RwLock<Option<SessionHandle>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
    pub file_index: Arc<RwLock<Option<DirectoryIndex>>>,
    /// Outlives sessions so lookups are made once per ability
    pub ability_cache: SharedAbilityCache,
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CliContext {
    pub fn new() -> Self {
        let config = AppConfig::load();
        let ability_cache = AbilityCache::load(&config.ability_cache_path).into_shared();
        Self {
            config: Arc::new(RwLock::new(config)),
            session: Arc::new(RwLock::new(None)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
            file_index: Arc::new(RwLock::new(None)),
            ability_cache,
        }
    }

    /// Replace the current session with a fresh one for `path`.
    pub async fn start_session(&self, path: PathBuf) -> SessionHandle {
        let resolver = Box::new(Arc::clone(&self.ability_cache));
        let handle = Arc::new(RwLock::new(ParsingSession::for_file(path, resolver)));
        *self.session.write().await = Some(Arc::clone(&handle));
        handle
    }

    /// Get the current session handle, if one exists.
    pub async fn session(&self) -> Option<SessionHandle> {
        self.session.read().await.clone()
    }

    pub async fn clear_session(&self) {
        *self.session.write().await = None;
    }
}

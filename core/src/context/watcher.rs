use super::log_files::is_network_log;
use super::{DirectoryIndex, WatcherError};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tokio::time::{Instant, sleep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    NewFile(PathBuf),
    /// File grew
    FileModified(PathBuf),
    FileRemoved(PathBuf),
    Message(String),
    Error(String),
}

pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl DirectoryWatcher {
    pub fn new(path: &Path) -> Result<Self, WatcherError> {
        let (tx, rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.blocking_send(res);
            },
            Config::default(),
        )
        .map_err(WatcherError::InitWatcher)?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatcherError::WatchPath {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    pub async fn next_event(&mut self) -> Option<DirectoryEvent> {
        while let Some(event_result) = self.rx.recv().await {
            match event_result {
                Ok(event) => {
                    if let Some(watcher_event) = self.process_event(event).await {
                        return Some(watcher_event);
                    }
                }
                Err(e) => {
                    return Some(DirectoryEvent::Error(format!(
                        "Directory watcher error: {}",
                        e
                    )));
                }
            }
        }
        None
    }

    async fn process_event(&mut self, event: Event) -> Option<DirectoryEvent> {
        let path = event.paths.into_iter().find(|p| is_network_log(p))?;
        match event.kind {
            EventKind::Create(_) => Some(self.handle_new_file(path).await),
            EventKind::Modify(_) => Some(DirectoryEvent::FileModified(path)),
            EventKind::Remove(_) => Some(DirectoryEvent::FileRemoved(path)),
            _ => None,
        }
    }

    async fn handle_new_file(&self, path: PathBuf) -> DirectoryEvent {
        const NEW_FILE_TIMEOUT: Duration = Duration::from_secs(60);
        const NEW_FILE_POLL_INTERVAL: Duration = Duration::from_millis(500);

        // ACT creates the file before its first write
        let start = Instant::now();
        while start.elapsed() < NEW_FILE_TIMEOUT {
            if path.metadata().map(|m| m.len()).unwrap_or(0) > 0 {
                tracing::debug!(path = %path.display(), "New log file");
                return DirectoryEvent::NewFile(path);
            }
            sleep(NEW_FILE_POLL_INTERVAL).await;
        }

        DirectoryEvent::Message(format!(
            "Warning: Timed out waiting for content in {}",
            path.display()
        ))
    }
}

/// Index `dir` and pick its newest log.
pub fn build_index(dir: &Path) -> Result<(DirectoryIndex, Option<PathBuf>), WatcherError> {
    let index = DirectoryIndex::build_index(dir)?;
    let newest = index.newest_file().map(|f| f.path.clone());
    Ok((index, newest))
}

use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub watcher: Option<JoinHandle<()>>,
    pub log_tail: Option<JoinHandle<()>>,
    pub ability_fetcher: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Stop tailing the current file and its lookups; the watcher keeps running.
    pub fn abort_tail(&mut self) {
        if let Some(handle) = self.log_tail.take() {
            handle.abort();
        }
        if let Some(handle) = self.ability_fetcher.take() {
            handle.abort();
        }
    }

    pub fn abort_all(&mut self) {
        self.abort_tail();
        if let Some(handle) = self.watcher.take() {
            handle.abort();
        }
    }
}

use super::WatcherError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use hashbrown::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LogFileMetaData {
    pub path: PathBuf,
    pub filename: String,
    /// Date from the file name, when it carries one
    pub date: Option<NaiveDate>,
    pub modified_at: NaiveDateTime,
    pub is_empty: bool,
    pub file_size: u64,
}

impl LogFileMetaData {
    /// Formatted timestamp for display (date + time)
    pub fn formatted_datetime(&self) -> String {
        self.modified_at.format("%Y-%m-%d %-H:%M").to_string()
    }

    /// Size in MB for display
    pub fn size_mb(&self) -> f64 {
        self.file_size as f64 / (1024.0 * 1024.0)
    }
}

#[derive(Default)]
pub struct DirectoryIndex {
    entries: HashMap<PathBuf, LogFileMetaData>,
}

impl DirectoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_index(dir: &Path) -> Result<Self, WatcherError> {
        let mut index = Self::new();

        if !dir.exists() {
            return Ok(index);
        }

        let read_dir = fs::read_dir(dir).map_err(|source| WatcherError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in read_dir.filter_map(|e| e.ok()) {
            let path = entry.path();
            if is_network_log(&path) {
                index.add_file(&path);
            }
        }

        tracing::debug!(dir = %dir.display(), files = index.len(), "Indexed log directory");
        Ok(index)
    }

    pub fn create_entry(path: &Path) -> Option<LogFileMetaData> {
        let filename = path.file_name()?.to_str()?.to_string();
        let metadata = fs::metadata(path).ok()?;
        let modified_at = metadata
            .modified()
            .ok()
            .map(|t| DateTime::<Local>::from(t).naive_local())?;
        let file_size = metadata.len();

        Some(LogFileMetaData {
            date: parse_log_filename(&filename),
            path: path.to_path_buf(),
            filename,
            modified_at,
            is_empty: file_size == 0,
            file_size,
        })
    }

    /// Index or re-index a file. `None` when its metadata can't be read.
    pub fn add_file(&mut self, path: &Path) -> Option<()> {
        let entry = Self::create_entry(path)?;
        self.entries.insert(entry.path.clone(), entry);
        Some(())
    }

    pub fn remove_file(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// All entries, newest first
    pub fn entries(&self) -> Vec<&LogFileMetaData> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        entries
    }

    /// The log ACT is most likely writing to
    pub fn newest_file(&self) -> Option<&LogFileMetaData> {
        self.entries
            .values()
            .max_by(|a, b| {
                a.modified_at
                    .cmp(&b.modified_at)
                    .then_with(|| a.filename.cmp(&b.filename))
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total size of all indexed files in bytes
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|e| e.file_size).sum()
    }
}

/// ACT names its logs `Network_<build>_<yyyymmdd>.log`.
pub fn is_network_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("Network_") && n.ends_with(".log"))
}

/// Date stamp from a log file name, if the last segment is `yyyymmdd`.
pub fn parse_log_filename(filename: &str) -> Option<NaiveDate> {
    let stem = filename.strip_suffix(".log")?;
    let (_, date) = stem.rsplit_once('_')?;
    NaiveDate::parse_from_str(date, "%Y%m%d").ok()
}

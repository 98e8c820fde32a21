use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashSet;
use tokio::sync::RwLock;

use super::{AbilityFetcher, AppConfig, ParsingSession};
use crate::combat_log::{LogLine, Reader, ReaderError};

/// Resolve a log file path, joining with log_directory if relative.
pub fn resolve_log_path(config: &AppConfig, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(&config.log_directory).join(path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Parsing Helper
// ─────────────────────────────────────────────────────────────────────────────

/// Result of parsing a log file
pub struct ParseResult {
    /// Every line in the file, decodable or not
    pub lines_processed: u64,
    pub decoded_lines: usize,
    /// Abilities added to the cache before applying
    pub abilities_fetched: usize,
    pub elapsed_ms: u128,
    /// Reader positioned for tailing from `end_pos`
    pub reader: Reader,
    pub end_pos: u64,
}

/// Parse the session's active file from the start.
///
/// Decoding runs in parallel; when a fetcher is given, enemy abilities not yet
/// cached are looked up before the lines are applied so that attempt
/// finalization sees their hit types.
pub async fn parse_file(
    state: Arc<RwLock<ParsingSession>>,
    fetcher: Option<&AbilityFetcher>,
) -> Result<ParseResult, ReaderError> {
    let timer = std::time::Instant::now();

    let active_path = {
        let s = state.read().await;
        s.active_file.clone()
    };
    let Some(active_path) = active_path else {
        return Err(ReaderError::OpenFile {
            path: PathBuf::new(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no active file"),
        });
    };

    let reader = Reader::from(active_path.clone(), Arc::clone(&state));
    let decoded = reader.read_log_file()?;

    let abilities_fetched = match fetcher {
        Some(fetcher) => fetcher.prefetch(&enemy_ability_ids(&decoded.lines)).await,
        None => 0,
    };

    let lines_processed = decoded.line_count;
    let decoded_lines = decoded.lines.len();
    let end_pos = decoded.end_pos;

    state.write().await.apply_decoded_log(decoded);

    let elapsed_ms = timer.elapsed().as_millis();
    tracing::info!(
        path = %active_path.display(),
        lines = lines_processed,
        decoded = decoded_lines,
        elapsed_ms,
        "Parsed log file"
    );

    Ok(ParseResult {
        lines_processed,
        decoded_lines,
        abilities_fetched,
        elapsed_ms,
        reader,
        end_pos,
    })
}

/// Unique enemy ability IDs in first-seen order
pub fn enemy_ability_ids(lines: &[LogLine]) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .filter_map(LogLine::enemy_ability_id)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

use super::{LogLine, LogParser, ReaderError};
use crate::context::ParsingSession;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs;
use std::io::SeekFrom;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{Duration, sleep};

const TAIL_SLEEP_DURATION: Duration = Duration::from_millis(100);

/// A whole file decoded in line order.
#[derive(Debug, Default)]
pub struct DecodedLog {
    /// Every line in the file, decodable or not
    pub line_count: u64,
    pub lines: Vec<LogLine>,
    pub end_pos: u64,
}

pub struct Reader {
    path: PathBuf,
    state: Arc<RwLock<ParsingSession>>,
    ability_tx: Option<UnboundedSender<String>>,
}

impl Reader {
    pub fn from(file_path: PathBuf, state: Arc<RwLock<ParsingSession>>) -> Self {
        Reader {
            path: file_path,
            state,
            ability_tx: None,
        }
    }

    /// Forward enemy ability IDs seen while tailing, for hit-type lookups.
    pub fn with_ability_sink(mut self, tx: UnboundedSender<String>) -> Self {
        self.ability_tx = Some(tx);
        self
    }

    // decoding is stateless so the whole file is decoded in parallel; the
    // caller applies the lines in order
    pub fn read_log_file(&self) -> Result<DecodedLog, ReaderError> {
        let file = fs::File::open(&self.path).map_err(|source| ReaderError::OpenFile {
            path: self.path.clone(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ReaderError::MemoryMap {
            path: self.path.clone(),
            source,
        })?;
        let bytes = mmap.as_ref();

        // Blank lines are kept so they count as processed. An unterminated
        // last line is still being written and is left for the tailer.
        let mut line_ranges: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for end in memchr_iter(b'\n', bytes) {
            line_ranges.push((start, end));
            start = end + 1;
        }
        let end_pos = start as u64;

        let parser = LogParser::new();
        let lines: Vec<LogLine> = line_ranges
            .par_iter()
            .filter_map(|&(start, end)| {
                let line = String::from_utf8_lossy(&bytes[start..end]);
                parser.parse_line(&line)
            })
            .collect();

        tracing::debug!(
            path = %self.path.display(),
            line_count = line_ranges.len(),
            decoded = lines.len(),
            pending_bytes = bytes.len() - start,
            "Decoded log file"
        );

        Ok(DecodedLog {
            line_count: line_ranges.len() as u64,
            lines,
            end_pos,
        })
    }

    // tailing a live file always goes through the session one line at a time
    pub async fn tail_log_file(self) -> Result<(), ReaderError> {
        let file = File::open(&self.path)
            .await
            .map_err(|source| ReaderError::OpenFile {
                path: self.path.clone(),
                source,
            })?;
        let mut reader = BufReader::new(file);
        let pos = self.state.read().await.current_byte.unwrap_or(0);

        reader
            .seek(SeekFrom::Start(pos))
            .await
            .map_err(|source| ReaderError::Seek {
                path: self.path.clone(),
                source,
            })?;

        let parser = LogParser::new();
        let mut buf = Vec::new();
        let mut offset = pos;

        loop {
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    sleep(TAIL_SLEEP_DURATION).await;
                    continue;
                }
                Ok(_) => {
                    // Only process complete lines, partial data stays in the buffer
                    if buf.ends_with(b"\n") {
                        offset += buf.len() as u64;
                        let line = String::from_utf8_lossy(&buf);
                        let decoded = parser.parse_line(&line);

                        if let (Some(tx), Some(ability_id)) = (
                            &self.ability_tx,
                            decoded.as_ref().and_then(LogLine::enemy_ability_id),
                        ) {
                            let _ = tx.send(ability_id.to_string());
                        }

                        let mut session = self.state.write().await;
                        session.apply_decoded_line(decoded);
                        session.current_byte = Some(offset);
                        buf.clear();
                    }
                }
                Err(source) => {
                    return Err(ReaderError::ReadFile {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::fixtures::*;
    use crate::hit_type::UnknownResolver;
    use crate::signal_processor::ParserState;
    use std::io::Write;
    use std::path::Path;

    fn temp_log(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("xivlog-reader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn session_for(path: &Path) -> Arc<RwLock<ParsingSession>> {
        Arc::new(RwLock::new(ParsingSession::for_file(
            path.to_path_buf(),
            Box::new(UnknownResolver),
        )))
    }

    fn append(path: &Path, bytes: &[u8]) {
        let mut file = fs::OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(bytes).unwrap();
    }

    /// Polls the session until `done` holds, giving up after about two seconds.
    async fn wait_until<F>(state: &Arc<RwLock<ParsingSession>>, done: F) -> bool
    where
        F: Fn(&ParsingSession) -> bool,
    {
        for _ in 0..100 {
            if done(&*state.read().await) {
                return true;
            }
            sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[test]
    fn test_read_log_file_keeps_line_order_and_counts() {
        let contents = format!(
            "{ZONE_CHANGE_TRIAL}\r\n\r\n{ADD_COMBATANT_PLAYER}\r\nnot a line\r\n{COMMENCE}\n"
        );
        let path = temp_log("order.log", &contents);
        let reader = Reader::from(path.clone(), session_for(&path));

        let decoded = reader.read_log_file().unwrap();

        assert_eq!(decoded.line_count, 5);
        assert_eq!(decoded.end_pos, contents.len() as u64);
        assert_eq!(decoded.lines.len(), 3);
        assert!(matches!(decoded.lines[0], LogLine::ZoneChange(_)));
        assert!(matches!(decoded.lines[1], LogLine::AddCombatant(_)));
        assert!(matches!(decoded.lines[2], LogLine::ActorControl(_)));
    }

    #[test]
    fn test_read_log_file_leaves_unterminated_line() {
        let complete = format!("{ZONE_CHANGE_TRIAL}\n");
        let contents = format!("{complete}{}", &COMMENCE[..30]);
        let path = temp_log("unterminated.log", &contents);
        let reader = Reader::from(path.clone(), session_for(&path));

        let decoded = reader.read_log_file().unwrap();

        assert_eq!(decoded.line_count, 1);
        assert_eq!(decoded.lines.len(), 1);
        assert_eq!(decoded.end_pos, complete.len() as u64);
    }

    #[tokio::test]
    async fn test_tail_picks_up_line_cut_off_by_full_read() {
        let contents = format!("{ZONE_CHANGE_TRIAL}\n{}", &COMMENCE[..30]);
        let path = temp_log("handoff.log", &contents);
        let state = session_for(&path);
        let reader = Reader::from(path.clone(), Arc::clone(&state));

        let decoded = reader.read_log_file().unwrap();
        state.write().await.apply_decoded_log(decoded);
        assert_eq!(
            state.read().await.processor().state(),
            ParserState::InInstance
        );

        let tail = tokio::spawn(reader.tail_log_file());
        append(&path, format!("{}\n", &COMMENCE[30..]).as_bytes());

        let file_len = fs::metadata(&path).unwrap().len();
        let caught_up = wait_until(&state, |s| s.current_byte == Some(file_len)).await;
        tail.abort();

        assert!(caught_up);
        let s = state.read().await;
        assert_eq!(s.processor().state(), ParserState::InCombat);
        assert_eq!(s.processor().lines_processed(), 2);
    }

    #[tokio::test]
    async fn test_tail_waits_for_newline() {
        let path = temp_log("partial.log", "");
        let state = session_for(&path);
        let tail = tokio::spawn(Reader::from(path.clone(), Arc::clone(&state)).tail_log_file());

        append(&path, ZONE_CHANGE_TRIAL[..40].as_bytes());
        sleep(Duration::from_millis(300)).await;
        {
            let s = state.read().await;
            assert_eq!(s.processor().lines_processed(), 0);
            assert_eq!(s.current_byte, None);
        }

        append(&path, format!("{}\n", &ZONE_CHANGE_TRIAL[40..]).as_bytes());
        let applied = wait_until(&state, |s| s.processor().lines_processed() == 1).await;
        tail.abort();

        assert!(applied);
        let s = state.read().await;
        assert_eq!(s.processor().state(), ParserState::InInstance);
        assert_eq!(s.current_byte, Some(ZONE_CHANGE_TRIAL.len() as u64 + 1));
    }

    #[tokio::test]
    async fn test_tail_applies_appended_lines() {
        let path = temp_log("appended.log", "");
        let state = session_for(&path);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let reader = Reader::from(path.clone(), Arc::clone(&state)).with_ability_sink(tx);
        let tail = tokio::spawn(reader.tail_log_file());

        // invalid UTF-8 in the player name is replaced, not rejected
        let combatant = ADD_COMBATANT_PLAYER.replace("Jalapeno", "Jalape\u{0}o");
        let mut bytes = Vec::new();
        for line in [ZONE_CHANGE_TRIAL, combatant.as_str(), COMMENCE, ABILITY_ENEMY_TO_PLAYER] {
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
        }
        let invalid = bytes.iter().position(|&b| b == 0).unwrap();
        bytes[invalid] = 0xF1;
        append(&path, &bytes);

        let applied = wait_until(&state, |s| s.processor().lines_processed() == 4).await;
        let ability_id = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        tail.abort();

        assert!(applied);
        assert_eq!(ability_id.unwrap().as_deref(), Some("B26F"));

        let s = state.read().await;
        assert_eq!(s.current_byte, Some(bytes.len() as u64));
        assert_eq!(s.processor().state(), ParserState::InCombat);
        assert_eq!(s.session().current_attempt().unwrap().ability_hits.len(), 1);
        let player = s.session().player("1075762D").unwrap();
        assert_eq!(player.name, "Jalape\u{FFFD}o Jeff");
    }

    #[test]
    fn test_read_log_file_missing_file() {
        let path = PathBuf::from("/nonexistent/Network_00000.log");
        let reader = Reader::from(path.clone(), session_for(&path));

        assert!(matches!(
            reader.read_log_file(),
            Err(ReaderError::OpenFile { .. })
        ));
    }
}

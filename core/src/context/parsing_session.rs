use crate::combat_log::{DecodedLog, LogLine};
use crate::session::Session;
use crate::signal_processor::{BoxedResolver, FightProcessor};
use std::path::PathBuf;

/// The active log file, how far into it we are, and the processor fed from it.
///
/// Shared as `Arc<RwLock<ParsingSession>>`; only one task writes at a time.
pub struct ParsingSession {
    pub current_byte: Option<u64>,
    pub active_file: Option<PathBuf>,
    processor: FightProcessor,
}

impl Default for ParsingSession {
    fn default() -> Self {
        Self {
            current_byte: None,
            active_file: None,
            processor: FightProcessor::new(),
        }
    }
}

impl ParsingSession {
    pub fn new(resolver: BoxedResolver) -> Self {
        Self {
            current_byte: None,
            active_file: None,
            processor: FightProcessor::with_resolver(resolver),
        }
    }

    pub fn for_file(path: PathBuf, resolver: BoxedResolver) -> Self {
        Self {
            active_file: Some(path),
            ..Self::new(resolver)
        }
    }

    pub fn apply_decoded_line(&mut self, decoded: Option<LogLine>) {
        self.processor.process(decoded);
    }

    pub fn apply_decoded_log(&mut self, log: DecodedLog) {
        self.current_byte = Some(log.end_pos);
        self.processor.process_decoded_log(log);
    }

    pub fn processor(&self) -> &FightProcessor {
        &self.processor
    }

    /// For registering handlers or swapping the resolver
    pub fn processor_mut(&mut self) -> &mut FightProcessor {
        &mut self.processor
    }

    pub fn session(&self) -> &Session {
        self.processor.session()
    }
}

use super::ParserState;
use crate::session::AttemptOutcome;
use chrono::NaiveDateTime;

/// Lifecycle signals emitted by the FightProcessor.
#[derive(Debug, Clone, PartialEq)]
pub enum FightSignal {
    /// Only emitted when the state actually changes
    StateChanged {
        from: ParserState,
        to: ParserState,
        timestamp: NaiveDateTime,
    },
    /// The attempt is finalized: hit types and unmitigated estimates are filled in
    AttemptCompleted {
        fight_id: u32,
        attempt_number: u32,
        outcome: AttemptOutcome,
    },
}

use serde::Serialize;
use std::fmt;

/// Where the processor is in the instance/pull lifecycle.
///
/// `Idle` is reserved for non-combat zones. Resolved pulls return to
/// `InInstance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ParserState {
    #[default]
    Idle,
    InInstance,
    InCombat,
    /// Wipe signalled, waiting for the barrier before the attempt is closed
    WipePending,
}

impl ParserState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserState::Idle => "idle",
            ParserState::InInstance => "in_instance",
            ParserState::InCombat => "in_combat",
            ParserState::WipePending => "wipe_pending",
        }
    }

    /// Deaths and effect results still belong to the pull in these states.
    pub fn is_engaged(&self) -> bool {
        matches!(self, ParserState::InCombat | ParserState::WipePending)
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

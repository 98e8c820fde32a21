pub mod combat_log;
pub mod context;
pub mod game_data;
pub mod hit_type;
pub mod mitigation;
pub mod session;
pub mod signal_processor;

// Re-exports for convenience
pub use combat_log::*;
pub use context::watcher as directory_watcher;
pub use hit_type::{
    AbilityCache, CachedAbility, HitType, HitTypeResolver, SharedAbilityCache, UnknownResolver,
    XivApiClient,
};
pub use mitigation::{MitigationEntry, MitigationSummary, total_mitigation, unmitigated_damage};
pub use session::{Attempt, AttemptOutcome, Fight, FightStats, Player, Session, SessionStats};
pub use signal_processor::{FightProcessor, FightSignal, ParserState, SignalHandler};

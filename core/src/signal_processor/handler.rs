use super::{FightSignal, ParserState};
use crate::session::{Attempt, Session};

/// Trait for consumers that react to fight lifecycle signals.
pub trait SignalHandler {
    /// The session is passed in its state right after the signal fired.
    fn handle_signal(&mut self, signal: &FightSignal, session: &Session);
}

/// Adapts a closure called with each new state.
pub struct StateChangeCallback<F>(pub F);

impl<F> SignalHandler for StateChangeCallback<F>
where
    F: FnMut(ParserState),
{
    fn handle_signal(&mut self, signal: &FightSignal, _session: &Session) {
        if let FightSignal::StateChanged { to, .. } = signal {
            (self.0)(*to);
        }
    }
}

/// Adapts a closure called with each finalized attempt.
pub struct AttemptCompleteCallback<F>(pub F);

impl<F> SignalHandler for AttemptCompleteCallback<F>
where
    F: FnMut(&Attempt),
{
    fn handle_signal(&mut self, signal: &FightSignal, session: &Session) {
        if let FightSignal::AttemptCompleted {
            fight_id,
            attempt_number,
            ..
        } = signal
            && let Some(attempt) = session
                .fight(*fight_id)
                .and_then(|fight| fight.attempt(*attempt_number))
        {
            (self.0)(attempt);
        }
    }
}

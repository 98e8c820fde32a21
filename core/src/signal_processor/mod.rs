pub mod handler;
pub mod processor;
pub mod shielding;
pub mod signal;
mod state;

#[cfg(test)]
mod processor_tests;

pub use handler::{AttemptCompleteCallback, SignalHandler, StateChangeCallback};
pub use processor::{BoxedHandler, BoxedResolver, FightProcessor};
pub use shielding::ShieldTracker;
pub use signal::FightSignal;
pub use state::ParserState;

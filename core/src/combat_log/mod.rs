mod actor;
mod codec;
mod combat_event;
mod error;
mod parser;
mod reader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use actor::*;
pub use codec::*;
pub use combat_event::*;
pub use error::ReaderError;
pub use parser::{LogParser, line_type, parse_timestamp, split_fields};
pub use reader::{DecodedLog, Reader};

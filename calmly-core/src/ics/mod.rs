//! Reading and writing single-event `.ics` files.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_event;

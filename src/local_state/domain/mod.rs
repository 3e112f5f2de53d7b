//! Keys and value encodings for persisted local markers.

mod key;
mod value;

pub use key::{ParseStateKeyError, StateKey};
pub use value::{format_date, format_flag, parse_date, parse_flag};

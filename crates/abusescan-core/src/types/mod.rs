mod dump;
mod reputation;

pub use dump::DUMP_FIELDS;
pub use reputation::*;

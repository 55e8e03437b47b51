//! API endpoint modules.

mod check;

pub use check::{CheckApi, MAX_AGE_IN_DAYS};

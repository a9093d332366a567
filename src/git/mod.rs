pub mod query;

pub use self::query::{collect, parse_log_output, GitLog};

pub mod aggregate;
pub mod cli;
pub mod discover;
pub mod error;
pub mod git;
pub mod model;
pub mod report;
pub mod util;

pub use aggregate::aggregate;
pub use error::{DriftError, Result};
pub use git::collect;
pub use model::{CommitRecord, Summary};

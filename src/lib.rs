//! Combines the release notes of every release between two versions of a
//! repository into one changelog, grouped by kind of change.
pub mod changelog;
pub mod cli;
pub mod command;
pub mod comparator;
pub mod config;
pub mod error;
pub mod fetch;
pub mod forge;
pub mod pager;
pub mod query;
pub mod range;
pub mod version;

pub use error::{ChangelogError, Result};

#[cfg(test)]
pub mod test_helpers;

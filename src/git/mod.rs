//! Git operations through the system `git` binary.

pub mod command;
pub mod log;
pub mod normalize;

pub use command::{GitExecutor, SystemGit};
pub use log::read_history;
pub use normalize::normalize_line;

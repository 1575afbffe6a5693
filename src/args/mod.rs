//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod defaults;
mod parsers;
mod types;


pub use cli::{AttackArgs, Cli, Command, ReportArgs};
pub use types::{AttackMode, Ordering, PositiveUsize};

pub(crate) use parsers::{parse_duration_arg, parse_header, parse_local_addr};

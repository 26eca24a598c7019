//! Command-line front end for the `calltrace` binary.
//!
//! # Module Structure
//!
//! - [`command`] - clap definitions (source of truth for flags)
//! - [`dispatch`] - loads sources and config, calls the engine
//! - [`output`] - human-readable rendering (JSON goes straight to serde)

pub mod command;
pub mod dispatch;
pub mod output;

pub use command::{Cli, Command, SourceArgs};
pub use dispatch::run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::AddressingMode;

#[derive(Parser, Debug)]
#[command(name = "calltrace")]
#[command(about = "Call dependencies, call hierarchies and module graphs for JS/TS code")]
#[command(version)]
pub struct Cli {
    /// Machine-readable output (stdout is JSON only, logs go to stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Config file (default: .calltrace/config.toml under the first path)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where source files come from: paths on disk, or a JSON manifest.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Files or directories to analyze
    #[arg(value_name = "PATHS", default_value = ".", conflicts_with = "manifest")]
    pub paths: Vec<PathBuf>,

    /// JSON array of {"path", "content"} objects, analyzed in virtual mode
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// What a function calls, with the source of each callee
    Deps {
        /// Function name to look up
        target: String,
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Which named functions call a function
    Callers {
        target: String,
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Named functions whose text mentions any of the keywords
    Keywords {
        /// Keywords (case-sensitive substrings)
        #[arg(value_name = "KEYWORD", required_unless_present = "preset")]
        keywords: Vec<String>,

        /// Use a keyword list from the [keywords.presets] config table
        #[arg(long, value_name = "NAME")]
        preset: Option<String>,

        /// Files or directories to search (default: current directory)
        #[arg(long = "in", value_name = "PATH", num_args = 1.., conflicts_with = "manifest")]
        inputs: Vec<PathBuf>,

        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Module import graph with cycles, hubs and orphans
    Graph {
        #[command(flatten)]
        source: SourceArgs,

        /// Minimum distinct importers for a hub (overrides config)
        #[arg(long, value_name = "N")]
        hub_threshold: Option<usize>,

        /// Also follow import('./x') and require('./x')
        #[arg(long)]
        include_dynamic: bool,

        /// Addressing mode (default: filesystem for paths, virtual for --manifest)
        #[arg(long, value_enum)]
        mode: Option<AddressingMode>,
    },

    /// Estimated complexity of one file ("-" reads stdin)
    Complexity {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Most complex named functions
    Hotspots {
        #[command(flatten)]
        source: SourceArgs,

        /// How many functions to show
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

impl Command {
    /// Directory whose `.calltrace/config.toml` applies to this command.
    pub fn config_root(&self) -> PathBuf {
        let first = match self {
            Command::Deps { source, .. }
            | Command::Callers { source, .. }
            | Command::Graph { source, .. }
            | Command::Hotspots { source, .. } => source.paths.first(),
            Command::Keywords { inputs, .. } => inputs.first(),
            Command::Complexity { .. } => None,
        };
        match first {
            Some(path) if path.is_dir() => path.clone(),
            _ => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn deps_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["calltrace", "deps", "main"]).unwrap();
        match cli.command {
            Command::Deps { target, source } => {
                assert_eq!(target, "main");
                assert_eq!(source.paths, vec![PathBuf::from(".")]);
                assert!(source.manifest.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.json);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn manifest_conflicts_with_paths() {
        let err = Cli::try_parse_from(["calltrace", "graph", "src", "--manifest", "m.json"]);
        assert!(err.is_err());
        let ok = Cli::try_parse_from(["calltrace", "graph", "--manifest", "m.json", "--json"]);
        assert!(ok.is_ok());
    }

    #[test]
    fn keywords_need_words_or_preset() {
        assert!(Cli::try_parse_from(["calltrace", "keywords"]).is_err());
        let cli =
            Cli::try_parse_from(["calltrace", "keywords", "--preset", "security", "--in", "src"])
                .unwrap();
        match cli.command {
            Command::Keywords {
                keywords,
                preset,
                inputs,
                ..
            } => {
                assert!(keywords.is_empty());
                assert_eq!(preset.as_deref(), Some("security"));
                assert_eq!(inputs, vec![PathBuf::from("src")]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn graph_mode_is_a_value_enum() {
        let cli = Cli::try_parse_from(["calltrace", "graph", "--mode", "virtual"]).unwrap();
        match cli.command {
            Command::Graph { mode, .. } => assert_eq!(mode, Some(AddressingMode::Virtual)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

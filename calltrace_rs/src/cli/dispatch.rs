//! Command handlers: load sources, call the engine, print the result.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::analyzer::callers::analyze_call_hierarchy_files;
use crate::analyzer::complexity::{estimate_complexity, rank_function_complexity};
use crate::analyzer::deps::analyze_dependencies;
use crate::analyzer::graph::build_module_graph_with_config;
use crate::analyzer::keywords::analyze_keywords_files;
use crate::config::CalltraceConfig;
use crate::manifest::{WalkOptions, collect_sources, load_manifest};
use crate::types::{AddressingMode, SourceFile};

use super::command::{Cli, Command, SourceArgs};
use super::output;

struct Sources {
    files: Vec<SourceFile>,
    mode: AddressingMode,
}

fn load_sources(
    paths: &[PathBuf],
    manifest: Option<&Path>,
    config: &CalltraceConfig,
) -> Result<Sources> {
    if let Some(manifest) = manifest {
        let files = load_manifest(manifest)
            .with_context(|| format!("loading manifest {}", manifest.display()))?;
        return Ok(Sources {
            files,
            mode: AddressingMode::Virtual,
        });
    }

    let options = WalkOptions {
        extensions: config.graph.extensions.clone(),
        ignore_dirs: config.scan.ignore_dirs.clone(),
    };
    let files = collect_sources(paths, &options).context("collecting source files")?;
    Ok(Sources {
        files,
        mode: AddressingMode::Filesystem,
    })
}

fn load_source_args(source: &SourceArgs, config: &CalltraceConfig) -> Result<Sources> {
    load_sources(&source.paths, source.manifest.as_deref(), config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serializing result")?
    );
    Ok(())
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
}

fn keyword_list(
    keywords: &[String],
    preset: Option<&str>,
    config: &CalltraceConfig,
) -> Result<Vec<String>> {
    let mut list = Vec::new();
    if let Some(name) = preset {
        let Some(words) = config.preset(name) else {
            let known: Vec<&str> = config.keywords.presets.keys().map(String::as_str).collect();
            bail!(
                "unknown keyword preset `{name}` (known: {})",
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            );
        };
        list.extend(words.iter().cloned());
    }
    list.extend(keywords.iter().cloned());
    Ok(list)
}

/// Execute a parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            CalltraceConfig::load_from_path(path)
        }
        None => CalltraceConfig::load(&cli.command.config_root()),
    };
    debug!(?config, "configuration loaded");

    match &cli.command {
        Command::Deps { target, source } => {
            let sources = load_source_args(source, &config)?;
            let result = analyze_dependencies(&sources.files, target)?;
            if cli.json {
                print_json(&result)
            } else {
                print!("{}", output::render_dependencies(target, &result));
                Ok(())
            }
        }

        Command::Callers { target, source } => {
            let sources = load_source_args(source, &config)?;
            let result = analyze_call_hierarchy_files(&sources.files, target)?;
            if cli.json {
                print_json(&result)
            } else {
                print!("{}", output::render_callers(&result));
                Ok(())
            }
        }

        Command::Keywords {
            keywords,
            preset,
            inputs,
            manifest,
        } => {
            let words = keyword_list(keywords, preset.as_deref(), &config)?;
            let paths = if inputs.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                inputs.clone()
            };
            let sources = load_sources(&paths, manifest.as_deref(), &config)?;
            let findings = analyze_keywords_files(&sources.files, &words)?;
            if cli.json {
                print_json(&findings)
            } else {
                print!("{}", output::render_keywords(&findings));
                Ok(())
            }
        }

        Command::Graph {
            source,
            hub_threshold,
            include_dynamic,
            mode,
        } => {
            let sources = load_source_args(source, &config)?;
            let mut graph_config = config.graph_config();
            if let Some(threshold) = hub_threshold {
                graph_config.hub_threshold = *threshold;
            }
            if *include_dynamic {
                graph_config.include_dynamic_imports = true;
            }
            let mode = mode.unwrap_or(sources.mode);
            let report = build_module_graph_with_config(&sources.files, mode, &graph_config)?;
            if cli.json {
                print_json(&report)
            } else {
                print!("{}", output::render_graph(&report));
                Ok(())
            }
        }

        Command::Complexity { file } => {
            let code = read_input(file)?;
            let complexity = estimate_complexity(&code);
            if cli.json {
                print_json(&json!({
                    "file": file.display().to_string(),
                    "complexity": complexity,
                }))
            } else {
                println!("{complexity}");
                Ok(())
            }
        }

        Command::Hotspots { source, top } => {
            let sources = load_source_args(source, &config)?;
            let mut ranked = rank_function_complexity(&sources.files);
            ranked.truncate(*top);
            if cli.json {
                print_json(&ranked)
            } else {
                print!("{}", output::render_hotspots(&ranked));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_words_come_first() {
        let mut config = CalltraceConfig::default();
        config
            .keywords
            .presets
            .insert("security".to_string(), vec!["eval".to_string()]);
        let words = keyword_list(&["fetch".to_string()], Some("security"), &config).unwrap();
        assert_eq!(words, vec!["eval", "fetch"]);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = CalltraceConfig::default();
        let err = keyword_list(&[], Some("nope"), &config).unwrap_err();
        assert!(err.to_string().contains("unknown keyword preset `nope`"));
    }
}

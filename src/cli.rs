//! Minimal CLI: resolve → (schema | example)
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// flatten `$ref`s in JSON-Schema-ish documents and optionally synthesize an
/// example value satisfying each schema's constraints
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// resolve local definitions and print the flattened schema
    Resolve(ResolveOut),
    /// resolve, then synthesize one example value per input schema
    Example(ExampleOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ResolveOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted; single input only)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ExampleOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted; single input only)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(
        &self,
        mut apply: impl FnMut(&str, serde_json::Value) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;
            let json_value = serde_json::from_str::<serde_json::Value>(&source)
                .with_context(|| format!("failed to parse JSON source file {source_path_str}"))?;
            apply(&source_path_str, json_value)?;
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Resolve(target) => {
                let mut results = Vec::new();
                target.input_settings.load_process(|_, doc| {
                    results.push(crate::resolve::resolve_document(&doc));
                    Ok(())
                })?;
                emit(results, target.out.as_deref())
            }
            Command::Example(target) => {
                let mut results = Vec::new();
                target.input_settings.load_process(|path, doc| {
                    let resolved = crate::resolve::resolve_document(&doc);
                    let node = crate::schema::SchemaNode::from_value(&resolved);
                    match crate::synth::synthesize(&node) {
                        Some(example) => results.push(example),
                        None => log::warn!("no example could be synthesized for {path}"),
                    }
                    Ok(())
                })?;
                emit(results, target.out.as_deref())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn emit(mut results: Vec<serde_json::Value>, out: Option<&std::path::Path>) -> anyhow::Result<()> {
    match out {
        Some(out_path) => {
            anyhow::ensure!(
                results.len() == 1,
                "--out expects exactly one input document, got {}",
                results.len()
            );
            let src = serde_json::to_string_pretty(&results.remove(0))?;
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out_path, src)?;
        }
        None => {
            for result in &results {
                println!("{}", serde_json::to_string_pretty(result)?);
            }
        }
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

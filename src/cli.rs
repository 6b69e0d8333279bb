//! Minimal CLI: infer → (interfaces | typescript)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::Value;

use crate::error;
use crate::ir::InterfaceDecl;
use crate::resolve::ConflictPolicy;
use crate::schema::Schema;
use crate::walk::{self, Walker};

// ------------------------------- Types ------------------------------------ //

/// infer a per-kind interface schema from sample syntax-tree documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print the declaration sequence as JSON
    Interfaces(InterfacesOut),
    /// infer and render TypeScript interface declarations
    Typescript(TypescriptOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat each input line as one corpus document (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// discriminator field that marks an object as a tree node
    #[arg(long, default_value = crate::value::DEFAULT_KIND_FIELD)]
    kind_field: String,

    /// maximum traversal depth before the run aborts
    #[arg(long, default_value_t = walk::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// widen array/non-array shape conflicts to the array shape instead of failing
    #[arg(long, default_value_t = false)]
    array_wins: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns.
    /// Argument order fixes the corpus order (and with it all output ordering).
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct InterfacesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TypescriptOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ---------------------------- Implementation ------------------------------ //

impl InputSettings {
    fn conflict_policy(&self) -> ConflictPolicy {
        if self.array_wins { ConflictPolicy::ArrayWins } else { ConflictPolicy::Strict }
    }

    /// Load the corpus in index order: each entry is (origin, parsed root).
    fn load_documents(&self) -> anyhow::Result<Vec<(String, Value)>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut documents = Vec::new();
        for source_path in source_paths {
            let origin = source_path.display().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read corpus file `{origin}`"))?;
            if self.ndjson {
                for (index, line) in source.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let origin = format!("{origin}:{}", index + 1);
                    let document = crate::value::parse_document(&origin, line)?;
                    documents.push((origin, document));
                }
            } else {
                let document = crate::value::parse_document(&origin, &source)?;
                documents.push((origin, document));
            }
        }
        Ok(documents)
    }

    /// Full pipeline: load → walk (per document, in parallel) → merge in
    /// corpus order → resolve + emit.
    fn infer_interfaces(&self) -> anyhow::Result<Vec<InterfaceDecl>> {
        let documents = self.load_documents()?;
        let walker = Walker {
            max_depth: self.max_depth,
            kind_field: self.kind_field.clone(),
        };

        let per_document: Vec<(&String, error::Result<Schema>)> = documents
            .par_iter()
            .map(|(origin, document)| {
                let mut part = Schema::new();
                let result = walker.walk(&mut part, document).map(|()| part);
                (origin, result)
            })
            .collect();

        // Fold in corpus-index order, not completion order, so first-encounter
        // ordering stays deterministic.
        let mut schema = Schema::new();
        for (origin, result) in per_document {
            let part = result.with_context(|| format!("while walking `{origin}`"))?;
            schema.merge(part);
        }

        let decls = crate::emit::emit(&schema, self.conflict_policy())?;
        Ok(decls)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Interfaces(target) => {
                let decls = target.input_settings.infer_interfaces()?;
                let json_src = serde_json::to_string_pretty(&decls)
                    .context("failed to serialize declarations")?;
                write_output(target.out.as_deref(), &json_src)
            }
            Command::Typescript(target) => {
                let decls = target.input_settings.infer_interfaces()?;
                let ts_src = crate::render::render_typescript(&decls);
                write_output(target.out.as_deref(), &ts_src)
            }
        }
    }
}

// ---------------------------- Internal helpers ---------------------------- //

/// Nothing is written until the whole pipeline has succeeded; callers only
/// reach this with a fully built artifact.
fn write_output(out: Option<&Path>, src: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create `{}`", parent.display()))?;
                }
            }
            std::fs::write(out, src)
                .with_context(|| format!("failed to write `{}`", out.display()))
        }
        None => {
            println!("{src}");
            Ok(())
        }
    }
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
            for entry in glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern `{pattern}`"))?
            {
                let path = entry.with_context(|| format!("while expanding `{pattern}`"))?;
                matched_any = true;
                out.push(path);
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

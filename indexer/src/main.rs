use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::snapshot::{save_snapshot, IndexSnapshot};
use search_core::tokenizer::load_noise_words;
use search_core::{load_manifest, KeywordIndex, NoiseWords, QueryEngine};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a keyword index and run two-keyword OR queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Manifest listing document files, whitespace separated
    #[arg(long, conflicts_with = "dir", required_unless_present = "dir")]
    docs: Option<PathBuf>,
    /// Index every .txt file below this directory instead of a manifest
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Noise words file, whitespace separated
    #[arg(long)]
    noise: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print its size, optionally exporting a JSON snapshot
    Build {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Write a JSON snapshot of the index here
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Top five documents containing either word
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        word1: String,
        #[arg(default_value = "")]
        word2: String,
    },
    /// Print the ranked occurrences of one keyword
    Show {
        #[command(flatten)]
        corpus: CorpusArgs,
        keyword: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, output } => {
            let (index, _) = build_index(&corpus)?;
            println!("{} documents, {} keywords", index.num_documents(), index.num_keywords());
            if let Some(output) = output {
                let created_at = time::OffsetDateTime::now_utc()
                    .format(&time::format_description::well_known::Rfc3339)
                    .unwrap_or_default();
                save_snapshot(&output, &IndexSnapshot::from_index(&index, created_at))?;
                tracing::info!(output = %output.display(), "snapshot written");
            }
            Ok(())
        }
        Commands::Search { corpus, word1, word2 } => {
            let (index, noise) = build_index(&corpus)?;
            match QueryEngine::new(&index, &noise).search(&word1, &word2) {
                Some(hits) => {
                    for (rank, doc) in hits.iter().enumerate() {
                        println!("{}. {}", rank + 1, doc);
                    }
                }
                None => println!("no match"),
            }
            Ok(())
        }
        Commands::Show { corpus, keyword } => {
            let (index, noise) = build_index(&corpus)?;
            let kw = search_core::tokenizer::keyword(&keyword, &noise).unwrap_or_default();
            let occurrences = index.occurrences(&kw);
            if occurrences.is_empty() {
                println!("{keyword}: not indexed");
            } else {
                println!("{}", serde_json::to_string_pretty(occurrences)?);
            }
            Ok(())
        }
    }
}

fn build_index(corpus: &CorpusArgs) -> Result<(KeywordIndex, NoiseWords)> {
    let documents = match (&corpus.docs, &corpus.dir) {
        (Some(manifest), _) => load_manifest(manifest)?,
        (None, Some(dir)) => collect_dir(dir)?,
        (None, None) => bail!("either --docs or --dir is required"),
    };
    let noise = load_noise_words(&corpus.noise)?;
    tracing::info!(num_docs = documents.len(), noise_words = noise.len(), "indexing");
    let index = KeywordIndex::build(documents, &noise)
        .with_context(|| format!("building index from {}", corpus_label(corpus)))?;
    Ok((index, noise))
}

fn corpus_label(corpus: &CorpusArgs) -> String {
    corpus
        .docs
        .as_ref()
        .or(corpus.dir.as_ref())
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Every `*.txt` below `dir`, sorted by path so merge order is reproducible.
/// Documents are named by their path relative to `dir`.
fn collect_dir(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).into_iter() {
        let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    Ok(files
        .into_iter()
        .map(|p| {
            let name = p.strip_prefix(dir).unwrap_or(&p).to_string_lossy().replace('\\', "/");
            (name, p)
        })
        .collect())
}

//! textconv CLI - plain-text to document conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use textconv::{
    detect_language, BatchMeta, ConvertOverrides, ConverterConfig, Document, DocumentConverter,
    IdHashKey, Meta, TextConverter, KNOWN_LIGATURES,
};

#[derive(Parser)]
#[command(name = "textconv")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert plain-text files to JSON documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert text files to JSON documents
    Convert {
        /// Input text files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// JSON file with converter defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Drop lines that look like numeric table rows
        #[arg(long)]
        remove_numeric_tables: bool,

        /// Keep numeric table rows even if the config removes them
        #[arg(long, conflicts_with = "remove_numeric_tables")]
        keep_numeric_tables: bool,

        /// Expected ISO 639-1 language (repeatable)
        #[arg(short, long = "language", value_name = "CODE")]
        languages: Vec<String>,

        /// Source text encoding (default: utf-8)
        #[arg(short, long, value_name = "LABEL")]
        encoding: Option<String>,

        /// Metadata attached to every document (repeatable)
        #[arg(short, long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,

        /// Document attribute used for the id: content, content_type, meta (repeatable)
        #[arg(long = "id-hash-key", value_name = "KEY")]
        id_hash_keys: Vec<String>,

        /// Leave ligatures (ﬁ, ﬂ, ...) unexpanded
        #[arg(long)]
        no_ligatures: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show line statistics and detected language of a text file
    Info {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Source text encoding (default: utf-8)
        #[arg(short, long, value_name = "LABEL")]
        encoding: Option<String>,
    },

    /// Show version information
    Version,
}

/// Arguments of the `convert` subcommand.
struct ConvertArgs {
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    remove_numeric_tables: Option<bool>,
    languages: Vec<String>,
    encoding: Option<String>,
    meta: Vec<String>,
    id_hash_keys: Vec<String>,
    no_ligatures: bool,
    compact: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            output,
            config,
            remove_numeric_tables,
            keep_numeric_tables,
            languages,
            encoding,
            meta,
            id_hash_keys,
            no_ligatures,
            compact,
        } => {
            let remove_numeric_tables = if remove_numeric_tables {
                Some(true)
            } else if keep_numeric_tables {
                Some(false)
            } else {
                None
            };
            cmd_convert(ConvertArgs {
                inputs,
                output,
                config,
                remove_numeric_tables,
                languages,
                encoding,
                meta,
                id_hash_keys,
                no_ligatures,
                compact,
            })
        }
        Commands::Info { input, encoding } => cmd_info(&input, encoding),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(args: ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match args.config {
        Some(ref path) => ConverterConfig::from_json_file(path)?,
        None => ConverterConfig::default(),
    };
    let converter = TextConverter::with_config(config);

    let mut overrides = ConvertOverrides::new();
    overrides.remove_numeric_tables = args.remove_numeric_tables;
    overrides.encoding = args.encoding;
    if !args.languages.is_empty() {
        overrides.valid_languages = Some(args.languages);
    }
    if !args.id_hash_keys.is_empty() {
        let keys = args
            .id_hash_keys
            .iter()
            .map(|key| key.parse::<IdHashKey>())
            .collect::<textconv::Result<Vec<_>>>()?;
        overrides.id_hash_keys = Some(keys);
    }

    let meta = parse_meta(&args.meta)?;
    let batch_meta = if meta.is_empty() {
        BatchMeta::None
    } else {
        BatchMeta::Shared(meta)
    };
    let ligatures: &[(&str, &str)] = if args.no_ligatures {
        &[]
    } else {
        KNOWN_LIGATURES
    };

    let pb = if args.inputs.len() > 1 {
        let pb = ProgressBar::new(args.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut documents: Vec<Document> = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        if let Some(ref pb) = pb {
            pb.set_message(input.display().to_string());
        }
        documents.extend(converter.run(
            std::slice::from_ref(input),
            batch_meta.clone(),
            &overrides,
            ligatures,
        )?);
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_with_message("Done!");
    }

    let json = if args.compact {
        serde_json::to_string(&documents)?
    } else {
        serde_json::to_string_pretty(&documents)?
    };

    if let Some(path) = args.output {
        fs::write(&path, &json)?;
        println!(
            "{} {} documents to {}",
            "Saved".green(),
            documents.len(),
            path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, encoding: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let converter = TextConverter::new();
    let mut overrides = ConvertOverrides::new().with_remove_numeric_tables(true);
    overrides.encoding = encoding;

    let result = converter.convert_with_stats(input, None, &overrides)?;
    let stats = result.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!(
        "{}: {}",
        "Numeric rows".bold(),
        stats.removed_line_count
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = result
        .documents
        .first()
        .map(|doc| doc.content())
        .unwrap_or_default();
    let words = text.split_whitespace().count();

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!(
        "{}: {}",
        "Language".bold(),
        detect_language(text).unwrap_or("unknown")
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "textconv".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Plain-text document conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/textconv".dimmed());
    println!("License: MIT");
}

/// Parse `KEY=VALUE` pairs into a metadata map.
fn parse_meta(entries: &[String]) -> textconv::Result<Meta> {
    entries
        .iter()
        .map(|entry| {
            entry
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .ok_or_else(|| textconv::Error::InvalidMeta(entry.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meta() {
        let meta = parse_meta(&["name=report.txt".to_string(), "year = 2021".to_string()])
            .unwrap();
        assert_eq!(meta["name"], "report.txt");
        assert_eq!(meta["year"], " 2021");
    }

    #[test]
    fn test_parse_meta_value_may_contain_equals() {
        let meta = parse_meta(&["query=a=b".to_string()]).unwrap();
        assert_eq!(meta["query"], "a=b");
    }

    #[test]
    fn test_parse_meta_rejects_missing_key() {
        assert!(parse_meta(&["novalue".to_string()]).is_err());
        assert!(parse_meta(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "textconv",
            "convert",
            "a.txt",
            "b.txt",
            "--remove-numeric-tables",
            "-l",
            "en",
            "--meta",
            "k=v",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert {
                inputs,
                remove_numeric_tables,
                languages,
                meta,
                ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert!(remove_numeric_tables);
                assert_eq!(languages, vec!["en"]);
                assert_eq!(meta, vec!["k=v"]);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_table_flags() {
        let result = Cli::try_parse_from([
            "textconv",
            "convert",
            "a.txt",
            "--remove-numeric-tables",
            "--keep-numeric-tables",
        ]);
        assert!(result.is_err());
    }
}

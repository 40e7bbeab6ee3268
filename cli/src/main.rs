//! outliner CLI - document outline inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use outliner::batch::{self, BatchOptions};
use outliner::{output, JsonFormat, Outliner, TitleStrategy};

#[derive(Parser)]
#[command(name = "outliner")]
#[command(version)]
#[command(about = "Infer document outlines from extracted text fragments", long_about = None)]
struct Cli {
    /// Input extracted-document JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one extracted document and emit its outline
    Analyze {
        /// Input extracted-document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Title resolution strategy
        #[arg(long, value_enum, default_value = "simple")]
        title_strategy: TitleMode,

        /// Learned classifier model file (JSON)
        #[arg(long, value_name = "FILE")]
        model: Option<PathBuf>,

        /// Minimum heading score (0.0-1.0)
        #[arg(long)]
        cutoff: Option<f32>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Analyze every *.json document in a directory
    Batch {
        /// Input directory of extracted-document JSON files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory for result files
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Title resolution strategy
        #[arg(long, value_enum, default_value = "simple")]
        title_strategy: TitleMode,

        /// Learned classifier model file (JSON)
        #[arg(long, value_name = "FILE")]
        model: Option<PathBuf>,

        /// Process files one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show statistics for an extracted document
    Info {
        /// Input extracted-document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TitleMode {
    /// Largest near-top span on the first page
    Simple,
    /// Marker absorption and grouped significant runs
    FrontMatter,
}

impl From<TitleMode> for TitleStrategy {
    fn from(mode: TitleMode) -> Self {
        match mode {
            TitleMode::Simple => TitleStrategy::Simple,
            TitleMode::FrontMatter => TitleStrategy::FrontMatter,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            output,
            title_strategy,
            model,
            cutoff,
            compact,
        }) => cmd_analyze(
            &input,
            output.as_deref(),
            title_strategy,
            model.as_deref(),
            cutoff,
            compact,
        ),
        Some(Commands::Batch {
            input,
            output,
            title_strategy,
            model,
            sequential,
            compact,
        }) => cmd_batch(
            &input,
            output.as_deref(),
            title_strategy,
            model.as_deref(),
            sequential,
            compact,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(
                    &input,
                    cli.output.as_deref(),
                    TitleMode::Simple,
                    None,
                    None,
                    false,
                )
            } else {
                println!("{}", "Usage: outliner <FILE> [OUTPUT]".yellow());
                println!("       outliner --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_outliner(
    title_strategy: TitleMode,
    model: Option<&Path>,
    cutoff: Option<f32>,
) -> Result<Outliner, Box<dyn std::error::Error>> {
    let mut outliner = Outliner::new().with_title_strategy(title_strategy.into());
    if let Some(cutoff) = cutoff {
        outliner = outliner.with_score_cutoff(cutoff);
    }
    if let Some(path) = model {
        outliner = outliner.with_model_file(path)?;
    }
    Ok(outliner)
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    title_strategy: TitleMode,
    model: Option<&Path>,
    cutoff: Option<f32>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = build_outliner(title_strategy, model, cutoff)?;
    let result = outliner.analyze_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = output::to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    title_strategy: TitleMode,
    model: Option<&Path>,
    sequential: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_outlines", stem))
    });

    let total = fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .count() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // ProgressBar is internally synchronized, safe to tick from workers
    let pb_worker = pb.clone();

    let options = BatchOptions {
        parallel: !sequential,
        format: if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        },
        on_file_done: Some(Box::new(move |stem: &str, ok: bool| {
            pb_worker.set_message(if ok {
                stem.to_string()
            } else {
                format!("{} (failed)", stem)
            });
            pb_worker.inc(1);
        })),
        ..build_outliner(title_strategy, model, None)?.into_batch_options()
    };

    let report = batch::process_directory(input, &output_dir, &options)?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Batch complete".green().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Processed".bold(), report.files_processed);
    println!("{}: {}", "Failed".bold(), report.files_failed);
    println!("{}: {}", "Headings".bold(), report.headings_emitted);
    println!("{}: {:.2?}", "Elapsed".bold(), report.elapsed);
    if let Some(bytes) = report.peak_memory_bytes {
        println!(
            "{}: {:.1} MB",
            "Peak memory".bold(),
            bytes as f64 / (1024.0 * 1024.0)
        );
    }
    println!("{}: {}", "Output".bold(), output_dir.display());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = outliner::read_document(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.total_pages);
    if let Some(ref title) = doc.title {
        println!("{}: {}", "Metadata title".bold(), title);
    }

    let fragments = doc.all_fragments();
    let words: usize = fragments
        .iter()
        .map(|f| f.text.split_whitespace().count())
        .sum();
    let sizes: Vec<f32> = fragments.iter().map(|f| f.size).collect();
    let max_size = sizes.iter().cloned().fold(0.0_f32, f32::max);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Fragments".bold(), fragments.len());
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {:.1}", "Largest font size".bold(), max_size);

    let result = outliner::analyze_document(&doc);
    println!();
    println!("{}", "Inferred Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Title".bold(), result.title);
    println!("{}: {}", "Headings".bold(), result.outline.len());
    for heading in result.outline.iter().take(10) {
        let indent = "  ".repeat(heading.level.depth() as usize - 1);
        println!(
            "  {}{} {} (p.{})",
            indent,
            heading.level.to_string().dimmed(),
            heading.text,
            heading.page
        );
    }
    if result.outline.len() > 10 {
        println!("  {} {} more", "…".dimmed(), result.outline.len() - 10);
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "outliner".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Document outline inference tool");
}

//! Command-line driver for the name harvest.
//!
//! Subcommands:
//! - `sweep` - walk every canto and chapter of the corpus
//! - `chapter <canto> <chapter>` - harvest a single chapter
//! - `chapters` - list all chapters and save the catalog artifact
//!
//! Exit codes: 0 on success (including a sweep that exhausts the corpus),
//! 1 on hard failure, 2 when `chapter` names a chapter absent from the
//! corpus.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gemini_client::GeminiClient;
use harvest::{
    write_catalog, ChapterOutcome, Corpus, GeminiMiner, HarvestPipeline, NameStore, MAX_CANTO,
};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "harvest", about = "Mine the vedabase for beautiful Sanskrit names")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Harvest every chapter of every canto
    Sweep {
        /// Canto to start from
        #[arg(long, default_value_t = 1)]
        from_canto: u32,

        /// Last canto of the corpus
        #[arg(long, default_value_t = MAX_CANTO)]
        max_canto: u32,
    },

    /// Harvest a single chapter
    Chapter { canto: u32, chapter: u32 },

    /// List all chapters and save the catalog artifact
    Chapters,
}

fn build_pipeline(config: &Config, corpus: Corpus) -> HarvestPipeline<GeminiMiner> {
    let miner = GeminiMiner::new(GeminiClient::new(config.gemini_api_key.clone()))
        .with_model(config.gemini_model.clone());

    HarvestPipeline::new(corpus, NameStore::new(&config.names_dir), miner)
        .with_catalog_path(&config.catalog_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let corpus = Corpus::open(&config.vedabase_path)
        .await
        .with_context(|| format!("Failed to open vedabase at {}", config.vedabase_path.display()))?;

    match cli.command {
        Command::Sweep {
            from_canto,
            max_canto,
        } => {
            let pipeline = build_pipeline(&config, corpus);
            let report = pipeline.sweep(from_canto, max_canto).await?;

            println!(
                "Sweep complete: {} chapters harvested, {} names appended.",
                report.chapters, report.appended
            );
        }

        Command::Chapter { canto, chapter } => {
            let pipeline = build_pipeline(&config, corpus);

            match pipeline.process_chapter(canto, chapter).await? {
                ChapterOutcome::Harvested(report) => {
                    println!(
                        "SB {}.{}: {} verses in {} batches, {} names appended ({} duplicates skipped).",
                        canto, chapter, report.verses, report.batches, report.appended, report.skipped
                    );
                }
                ChapterOutcome::NotFound => {
                    eprintln!("SB {}.{}: not found in SB.", canto, chapter);
                    std::process::exit(2);
                }
            }
        }

        Command::Chapters => {
            let catalog = corpus.chapter_catalog().await?;

            for entry in &catalog {
                println!(
                    "{}  |  {}  [{}..{}]",
                    entry.canto_title, entry.chapter_title, entry.first_record, entry.last_record
                );
            }
            println!("Found {} chapters in SB.", catalog.len());

            write_catalog(&config.catalog_path, &catalog)?;
            println!("Chapters saved to {}.", config.catalog_path.display());
        }
    }

    Ok(())
}

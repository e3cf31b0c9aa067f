//! Main entry point for the chatzip CLI application.
//!
//! Converts chat-export ZIP archives (Instagram/Facebook "Download Your
//! Data" exports) into plain-text transcripts, one conversation at a time,
//! using small position-addressed reads instead of a full unzip.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use chatzip::{Cli, IngestConfig, Ingestor, LocalFileReader};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.marker {
        Some(marker) => IngestConfig::new().with_marker(marker.clone()),
        None => IngestConfig::new(),
    };

    let reader = Arc::new(LocalFileReader::new(Path::new(&cli.archive))?);
    let ingestor = Ingestor::open(reader, config).await?;

    if cli.list {
        return list_conversations(&ingestor);
    }

    let Some(folder) = &cli.folder else {
        bail!("no conversation folder given; use -l to list folders first");
    };

    convert_conversation(&ingestor, folder, &cli).await
}

/// Print the conversation folders found in the archive, sorted by display
/// name with the raw folder key alongside.
fn list_conversations(ingestor: &Ingestor<LocalFileReader>) -> Result<()> {
    let listing = ingestor.list_conversations();

    if listing.folders.is_empty() {
        bail!("no conversation folders found (no messages/inbox structure in this archive)");
    }

    eprintln!("Conversations under '{}':", listing.marker);
    let mut folders = listing.folders;
    folders.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    for folder in &folders {
        println!("{:<30} {}", folder.display_name, folder.folder_key);
    }

    Ok(())
}

/// Convert one conversation and write the transcript to stdout or a file.
async fn convert_conversation(
    ingestor: &Ingestor<LocalFileReader>,
    folder: &str,
    cli: &Cli,
) -> Result<()> {
    let ingestion = ingestor.convert(folder).await?;

    if !cli.quiet {
        eprintln!(
            "{} messages from '{}'",
            ingestion.message_count, ingestion.marker
        );
        if ingestion.skipped_shards > 0 {
            eprintln!("warning: {} malformed shard(s) skipped", ingestion.skipped_shards);
        }
        if ingestion.skipped_entries > 0 {
            eprintln!(
                "warning: {} entr(ies) with unsupported compression skipped",
                ingestion.skipped_entries
            );
        }
    }

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, &ingestion.transcript).await?;
            if !cli.quiet {
                eprintln!("transcript written to {}", path);
            }
        }
        None => {
            use tokio::io::AsyncWriteExt;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(ingestion.transcript.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
    }

    Ok(())
}

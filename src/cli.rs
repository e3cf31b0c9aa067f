use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatzip")]
#[command(version)]
#[command(about = "Convert chat-export ZIP archives into plain-text transcripts", long_about = None)]
#[command(after_help = "Examples:\n  \
  chatzip -l export.zip                 list conversations in the export\n  \
  chatzip export.zip sam_12345          print the transcript of one conversation\n  \
  chatzip export.zip sam_12345 -o sam.txt   write the transcript to a file")]
pub struct Cli {
    /// Chat-export ZIP file path
    #[arg(value_name = "ARCHIVE")]
    pub archive: String,

    /// Conversation folder key to convert (see -l)
    #[arg(value_name = "FOLDER")]
    pub folder: Option<String>,

    /// List conversation folders
    #[arg(short = 'l')]
    pub list: bool,

    /// Write the transcript to a file instead of stdout
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<String>,

    /// Probe only this inbox marker path
    #[arg(long, value_name = "PATH")]
    pub marker: Option<String>,

    /// Quiet mode: suppress progress and skip-count messages
    #[arg(short = 'q')]
    pub quiet: bool,
}

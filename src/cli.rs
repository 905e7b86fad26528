use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "yt2notes",
    about = "Turn a YouTube video's transcript into structured Markdown notes and a PDF",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL or video ID (prompts on stdin if omitted)
    pub url: Option<String>,

    /// LLM model used to structure each chunk
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum words per transcript chunk
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Directory for the generated .md and .pdf files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Preferred caption language
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Title embedded in the generated PDF
    #[arg(short, long)]
    pub title: Option<String>,

    /// Write Markdown only, skip PDF conversion
    #[arg(long)]
    pub no_pdf: bool,

    /// Attempts per network call (1 disables retries)
    #[arg(long)]
    pub attempts: Option<u32>,

    /// API key for the LLM provider
    #[arg(long)]
    pub api_key: Option<String>,

    /// Path to the config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show resolved settings and transcript details
    #[arg(short, long)]
    pub verbose: bool,
}

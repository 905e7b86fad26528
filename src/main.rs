use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::Command;

use eyre::{Result, bail};
use log::{debug, info, warn};

mod cli;

use cli::Cli;
use yt2notes::config::{Config, Overrides, Settings};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("yt2notes.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("yt2notes")
        .join("logs")
}

fn tool_version(name: &str) -> Option<String> {
    Command::new(name)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .trim()
                .lines()
                .next()
                .unwrap_or("")
                .to_string()
        })
}

fn build_after_help() -> String {
    let pandoc_line = match tool_version(yt2notes::pdf::DEFAULT_CONVERTER) {
        Some(v) => format!("  \x1b[32m✅\x1b[0m {v}"),
        None => "  \x1b[31m❌\x1b[0m pandoc     (not found, needed for PDF output unless --no-pdf)".to_string(),
    };

    let log_path = log_dir().join("yt2notes.log");

    format!(
        "\nREQUIRED TOOLS:\n{pandoc_line}\n\nConfig is read from: {}\nLogs are written to: {}",
        yt2notes::config::config_path().display(),
        log_path.display()
    )
}

fn prompt_for_url() -> Result<String> {
    print!("Enter YouTube URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Config file problems are non-fatal: fall back to defaults
    let config_path = cli.config.clone().unwrap_or_else(yt2notes::config::config_path);
    let loaded = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        warn!("Ignoring config file {}: {e}", config_path.display());
        eprintln!("Warning: ignoring config file {}: {e}", config_path.display());
        Config::default()
    });

    let overrides = Overrides {
        api_key: cli.api_key.clone(),
        model: cli.model.clone(),
        max_words: cli.max_words,
        output_dir: cli.output_dir.clone(),
        pdf_title: cli.title.clone(),
        lang: cli.lang.clone(),
        attempts: cli.attempts,
        no_pdf: cli.no_pdf,
    };
    let settings = Settings::resolve(config, overrides)?;

    if cli.verbose {
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!(
            "Model: {} ({})\nMax words per chunk: {}\nOutput dir: {}\nLanguage: {}\nAttempts: {}",
            settings.model,
            settings.provider(),
            settings.max_words,
            settings.output_dir.display(),
            settings.lang,
            settings.attempts,
        );
    }
    debug!("Resolved model={} max_words={}", settings.model, settings.max_words);

    let url = match cli.url {
        Some(url) => url.trim().to_string(),
        None => prompt_for_url()?,
    };

    if url.is_empty() {
        bail!("no URL or video ID provided\n\nUsage: yt2notes <URL>\n       echo <URL> | yt2notes");
    }

    let client = reqwest::Client::new();
    let artifacts = yt2notes::pipeline::run(&client, &settings, &url).await?;

    match artifacts.pdf {
        Some(pdf) => println!("PDF successfully generated: {}", pdf.display()),
        None => println!("PDF conversion skipped (--no-pdf)"),
    }

    Ok(())
}

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, bail};
use log::{debug, info};

use crate::config::Settings;
use crate::youtube::TitleSource;
use crate::{extract_video_id, is_bare_video_id, output, parse_url, pdf, structure, text, youtube};

/// Files produced by a run
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub markdown: PathBuf,
    pub pdf: Option<PathBuf>,
}

/// Retry an async operation with exponential backoff; one attempt means no retry
pub async fn retry<F, Fut, T>(max_attempts: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                let delay = backoff_delay(attempt);
                debug!("Attempt {attempt} failed: {e}, retrying in {delay:?}");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Delay before the next try after `attempt` failures: 500ms doubling each time
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(2u64.saturating_pow(attempt.saturating_sub(1)).saturating_mul(500))
}

/// Absolute page URL to scrape the title from: bare IDs and scheme-less input
/// are turned into requestable URLs.
fn title_page_url(input: &str, video_id: &str) -> String {
    let input = input.trim();
    if is_bare_video_id(input) {
        return youtube::watch_url(video_id);
    }
    match parse_url(input) {
        Some(url) => url.to_string(),
        None => youtube::watch_url(video_id),
    }
}

/// Clean the raw transcript; nothing left to structure is fatal
fn clean_for_structuring(video_id: &str, raw: &str) -> Result<String> {
    let cleaned = text::clean_transcript(raw)?;
    if cleaned.is_empty() {
        bail!("transcript for video {video_id} is empty after cleaning");
    }
    Ok(cleaned)
}

/// Turn one video URL into a Markdown study document and, optionally, a PDF.
///
/// Stages run strictly in order and the first fatal error ends the run. Files
/// already written stay on disk.
pub async fn run(client: &reqwest::Client, settings: &Settings, url: &str) -> Result<Artifacts> {
    println!("Extracting video ID...");
    let video_id = extract_video_id(url)?;
    info!("Resolved video ID {video_id} from {url}");

    println!("Fetching video title...");
    let title = youtube::fetch_title(client, &title_page_url(url, &video_id)).await;
    if let TitleSource::Fallback { reason } = &title.source {
        eprintln!("Warning: Could not fetch title ({reason}). Using default name.");
    }

    let base = output::filename_base(&title);
    println!("Target Filename: {base}.md");

    println!("Fetching subtitles...");
    let transcript = retry(settings.attempts, || youtube::fetch_captions(client, &video_id, &settings.lang)).await?;
    let raw = transcript.joined_text();
    debug!(
        "Transcript for {}: {} segments, lang={}, {} chars",
        transcript.video_id,
        transcript.segments.len(),
        transcript.language,
        raw.len()
    );

    println!("Cleaning transcript...");
    let cleaned = clean_for_structuring(&video_id, &raw)?;

    println!("Chunking transcript...");
    let chunks = text::chunk_words(&cleaned, settings.max_words)?;
    let total = chunks.len();
    println!("\nTotal chunks: {total}\n");

    let provider = settings.provider();
    let mut sections = Vec::with_capacity(total);
    for (i, chunk) in chunks.iter().enumerate() {
        let part = i + 1;
        println!("Structuring chunk {part}/{total} with {provider}...");
        let section = retry(settings.attempts, || {
            structure::structure_chunk(client, &settings.api_key, &settings.model, chunk, part, total)
        })
        .await?;
        sections.push(section);
    }

    let document = output::render_document(&sections);
    let markdown = output::write_markdown(&settings.output_dir, &base, &document)?;
    info!("Markdown written: {}", markdown.display());

    println!("\nDONE");
    println!("Notes saved as: {}", markdown.display());

    if !settings.pdf {
        return Ok(Artifacts { markdown, pdf: None });
    }

    println!("Converting to PDF...");
    let pdf_path = output::pdf_path_for(&markdown);
    pdf::convert(&settings.converter, &markdown, &pdf_path, &settings.pdf_title)?;

    Ok(Artifacts {
        markdown,
        pdf: Some(pdf_path),
    })
}
